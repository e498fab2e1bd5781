pub const START_BYTE_OFFSET: usize = 0;
pub const LENGTH_OFFSET: usize = 1;
pub const LENGTH_REPEAT_OFFSET: usize = 2;
pub const SECOND_START_OFFSET: usize = 3;
pub const CONTROL_FIELD_OFFSET: usize = 4;
pub const ADDRESS_FIELD_OFFSET: usize = 5;

/// Start, length twice, start again, control, address.
pub const LONG_FRAME_HEADER_LEN: usize = 6;
/// Largest long frame the wired transport produces.
pub const MAX_FRAME_LEN: usize = 261;

pub const SINGLE_CHARACTER: u8 = 0xE5;
pub const LONG_FRAME_START: u8 = 0x68;

pub const CONTROL_FIELD_MASK: u8 = 0xCF;
pub const CONTROL_FIELD_RSP_UD: u8 = 0x08;
pub const CONTROL_ACD_BIT: u8 = 0x20;
pub const CONTROL_DFC_BIT: u8 = 0x10;

/// CI field of a variable data response carrying a long header.
pub const CI_RSP_UD_LONG_HEADER: u8 = 0x72;
/// Offset of the long-header secondary address within the payload.
pub const LONG_HEADER_ADDRESS_OFFSET: usize = 1;
