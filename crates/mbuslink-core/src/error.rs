use thiserror::Error;

pub use crate::frame::error::FormatError;

/// Caller contract violations.
///
/// These indicate a programming error on the calling side (an argument the
/// codec never accepts), as opposed to [`FormatError`], which reports
/// malformed wire data.
///
/// # Examples
/// ```
/// use mbuslink_core::{Bcd, InvalidArgument};
///
/// let err = Bcd::from_integer(-1).unwrap_err();
/// assert!(matches!(err, InvalidArgument::BcdOutOfRange { value: -1 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("unsupported BCD length: {length} (expected 1, 2, 3, 4 or 6 bytes)")]
    BcdLength { length: usize },
    #[error("BCD value out of range: {value} (expected 0..=99999999)")]
    BcdOutOfRange { value: i64 },
    #[error("{length} byte BCD at offset {offset} exceeds buffer of {available} bytes")]
    BcdOutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
    #[error("manufacturer id must be 3 characters or empty, got {length}")]
    ManufacturerLength { length: usize },
    #[error("device id must be a 4 byte BCD, got {length} bytes")]
    DeviceIdLength { length: usize },
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
