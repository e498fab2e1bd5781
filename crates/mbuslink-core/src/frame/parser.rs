use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::FormatError;
use super::layout;
use super::reader::FrameReader;
use crate::address::{HeaderLayout, SecondaryAddress};
use crate::hex;

/// Link-layer message classes a slave can send to the master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Single character acknowledgement (`0xE5`).
    SingleCharacter,
    /// Long frame user-data response (`0x68`).
    RspUd,
}

impl MessageType {
    pub fn from_start_byte(value: u8) -> Result<Self, FormatError> {
        match value {
            layout::SINGLE_CHARACTER => Ok(Self::SingleCharacter),
            layout::LONG_FRAME_START => Ok(Self::RspUd),
            _ => Err(FormatError::UnexpectedStartByte { value }),
        }
    }

    pub fn start_byte(self) -> u8 {
        match self {
            Self::SingleCharacter => layout::SINGLE_CHARACTER,
            Self::RspUd => layout::LONG_FRAME_START,
        }
    }
}

/// A validated link-layer message.
///
/// The long frame variant borrows the caller's buffer; its payload is a view,
/// never a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayerMessage<'a> {
    SingleCharacterAck,
    LongFrameResponse(LongFrame<'a>),
}

impl<'a> LinkLayerMessage<'a> {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::SingleCharacterAck => MessageType::SingleCharacter,
            Self::LongFrameResponse(_) => MessageType::RspUd,
        }
    }

    pub fn long_frame(&self) -> Option<&LongFrame<'a>> {
        match self {
            Self::SingleCharacterAck => None,
            Self::LongFrameResponse(frame) => Some(frame),
        }
    }
}

/// Header fields and payload view of a long frame response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongFrame<'a> {
    pub control_field: u8,
    pub address_field: u8,
    /// Everything after the fixed header, starting with the CI field.
    pub payload: &'a [u8],
}

impl<'a> LongFrame<'a> {
    /// Position of the payload inside the decoded buffer.
    pub fn payload_range(&self) -> Range<usize> {
        layout::LONG_FRAME_HEADER_LEN..layout::LONG_FRAME_HEADER_LEN + self.payload.len()
    }

    pub fn ci_field(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    pub fn access_demand(&self) -> bool {
        self.control_field & layout::CONTROL_ACD_BIT != 0
    }

    pub fn data_flow_control(&self) -> bool {
        self.control_field & layout::CONTROL_DFC_BIT != 0
    }

    /// Secondary address of a variable data response with a long header.
    ///
    /// Returns `Ok(None)` when the CI field announces another structure.
    pub fn long_header_address(&self) -> Result<Option<SecondaryAddress>, FormatError> {
        if self.ci_field() != Some(layout::CI_RSP_UD_LONG_HEADER) {
            return Ok(None);
        }
        SecondaryAddress::parse(
            self.payload,
            layout::LONG_HEADER_ADDRESS_OFFSET,
            HeaderLayout::Long,
        )
        .map(Some)
    }
}

/// Decode the first `length` bytes of `buffer` as a link-layer message.
///
/// Long frames are checked in a fixed order: repeated length field, second
/// start delimiter, control field, then the declared length against the
/// buffer. The first failing check is reported.
///
/// # Examples
/// ```
/// use mbuslink_core::{LinkLayerMessage, parse_link_layer_message};
///
/// let message = parse_link_layer_message(&[0xE5], 1)?;
/// assert_eq!(message, LinkLayerMessage::SingleCharacterAck);
/// # Ok::<(), mbuslink_core::FormatError>(())
/// ```
pub fn parse_link_layer_message(
    buffer: &[u8],
    length: usize,
) -> Result<LinkLayerMessage<'_>, FormatError> {
    let reader = FrameReader::new(buffer, length).map_err(reject)?;
    tracing::trace!(frame = %hex::dump(reader.as_bytes()), "decoding link layer message");

    let start = reader.start_byte().map_err(reject)?;
    match MessageType::from_start_byte(start).map_err(reject)? {
        MessageType::SingleCharacter => Ok(LinkLayerMessage::SingleCharacterAck),
        MessageType::RspUd => parse_long_frame(&reader)
            .map(LinkLayerMessage::LongFrameResponse)
            .map_err(reject),
    }
}

fn parse_long_frame<'a>(reader: &FrameReader<'a>) -> Result<LongFrame<'a>, FormatError> {
    let first = reader.read_u8(layout::LENGTH_OFFSET)?;
    let second = reader.read_u8(layout::LENGTH_REPEAT_OFFSET)?;
    if first != second {
        return Err(FormatError::LengthFieldsDiffer { first, second });
    }

    let delimiter = reader.read_u8(layout::SECOND_START_OFFSET)?;
    if delimiter != layout::LONG_FRAME_START {
        return Err(FormatError::MissingStartDelimiter { actual: delimiter });
    }

    let control_field = reader.read_u8(layout::CONTROL_FIELD_OFFSET)?;
    if control_field & layout::CONTROL_FIELD_MASK != layout::CONTROL_FIELD_RSP_UD {
        return Err(FormatError::UnexpectedControlField {
            value: control_field,
        });
    }

    let payload = reader.body()?;
    if usize::from(first) != payload.len() {
        return Err(FormatError::LengthMismatch {
            declared: usize::from(first),
            actual: payload.len(),
        });
    }

    let address_field = reader.read_u8(layout::ADDRESS_FIELD_OFFSET)?;
    Ok(LongFrame {
        control_field,
        address_field,
        payload,
    })
}

fn reject(err: FormatError) -> FormatError {
    tracing::debug!(error = %err, "rejected link layer message");
    err
}
