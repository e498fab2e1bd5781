use std::ops::Range;

pub const SECONDARY_ADDRESS_LEN: usize = 8;

pub const LONG_DEVICE_ID_RANGE: Range<usize> = 0..4;
pub const LONG_MANUFACTURER_RANGE: Range<usize> = 4..6;

pub const SHORT_MANUFACTURER_RANGE: Range<usize> = 0..2;
pub const SHORT_DEVICE_ID_RANGE: Range<usize> = 2..6;

pub const VERSION_OFFSET: usize = 6;
pub const DEVICE_TYPE_OFFSET: usize = 7;
