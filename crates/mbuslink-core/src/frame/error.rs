use thiserror::Error;

/// Malformed wire data.
///
/// Returned by frame decoding and by secondary-address parsing when the
/// buffer cannot hold the fields being read. Always fatal to the single
/// decode call; resynchronisation is left to the transport.
///
/// # Examples
/// ```
/// use mbuslink_core::{FormatError, parse_link_layer_message};
///
/// let err = parse_link_layer_message(&[0x10], 1).unwrap_err();
/// assert_eq!(err, FormatError::UnexpectedStartByte { value: 0x10 });
/// assert!(err.to_string().contains("unexpected first byte"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unexpected first byte: 0x{value:02X} (expected 0xE5 or 0x68)")]
    UnexpectedStartByte { value: u8 },
    #[error("length fields differ: {first} and {second}")]
    LengthFieldsDiffer { first: u8, second: u8 },
    #[error("missing start delimiter: expected 0x68, got 0x{actual:02X}")]
    MissingStartDelimiter { actual: u8 },
    #[error("unexpected control field: 0x{value:02X} (expected 0x08 under mask 0xCF)")]
    UnexpectedControlField { value: u8 },
    #[error("length mismatch: length field {declared}, buffer holds {actual} bytes after the header")]
    LengthMismatch { declared: usize, actual: usize },
}
