//! Binary-coded decimal numbers as used on the M-Bus.
//!
//! Digits are packed two per byte, least significant byte first. A high
//! nibble of `0xF` in the most significant byte marks a negative value
//! instead of carrying a digit.

use std::fmt;

use crate::error::InvalidArgument;

const LOW_NIBBLE: u8 = 0x0F;
const HIGH_NIBBLE: u8 = 0xF0;

/// Byte widths with defined semantics.
pub const SUPPORTED_LENGTHS: [usize; 5] = [1, 2, 3, 4, 6];
/// Largest value accepted by [`Bcd::from_integer`].
pub const MAX_INTEGER: i64 = 99_999_999;
/// Width produced by [`Bcd::from_integer`].
pub const INTEGER_LEN: usize = 4;

/// An immutable packed-decimal number.
///
/// Digit nibbles of 10 to 14 are not rejected; they render as the ASCII
/// characters following `'9'` and count with their raw value.
///
/// # Examples
/// ```
/// use mbuslink_core::Bcd;
///
/// let bcd = Bcd::from_slice(&[0x44, 0x44, 0x44, 0xF4])?;
/// assert_eq!(bcd.to_string(), "-4444444");
/// assert_eq!(bcd.to_i64(), -4_444_444);
/// # Ok::<(), mbuslink_core::InvalidArgument>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bcd {
    bytes: Vec<u8>,
}

impl Bcd {
    /// Copy `length` bytes starting at `offset`.
    pub fn from_bytes(buffer: &[u8], offset: usize, length: usize) -> Result<Self, InvalidArgument> {
        if !SUPPORTED_LENGTHS.contains(&length) {
            return Err(InvalidArgument::BcdLength { length });
        }
        let bytes = offset
            .checked_add(length)
            .and_then(|end| buffer.get(offset..end))
            .ok_or(InvalidArgument::BcdOutOfBounds {
                offset,
                length,
                available: buffer.len(),
            })?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        Self::from_bytes(bytes, 0, bytes.len())
    }

    /// Encode a non-negative integer into the fixed 4 byte width.
    pub fn from_integer(value: i64) -> Result<Self, InvalidArgument> {
        if !(0..=MAX_INTEGER).contains(&value) {
            return Err(InvalidArgument::BcdOutOfRange { value });
        }
        let mut rest = value;
        let mut bytes = vec![0u8; INTEGER_LEN];
        for byte in bytes.iter_mut() {
            let pair = (rest % 100) as u8;
            *byte = ((pair / 10) << 4) | (pair % 10);
            rest /= 100;
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.most_significant() & HIGH_NIBBLE == HIGH_NIBBLE
    }

    /// Decimal value as a 32-bit integer.
    ///
    /// Wider numbers wrap silently.
    pub fn to_i32(&self) -> i32 {
        let (lower, top) = self.split();
        let mut result: i32 = 0;
        let mut factor: i32 = 1;
        for byte in lower {
            result = result.wrapping_add(i32::from(byte & LOW_NIBBLE).wrapping_mul(factor));
            factor = factor.wrapping_mul(10);
            result = result.wrapping_add(i32::from(byte >> 4).wrapping_mul(factor));
            factor = factor.wrapping_mul(10);
        }
        result = result.wrapping_add(i32::from(top & LOW_NIBBLE).wrapping_mul(factor));
        factor = factor.wrapping_mul(10);
        if self.is_negative() {
            result.wrapping_neg()
        } else {
            result.wrapping_add(i32::from(top >> 4).wrapping_mul(factor))
        }
    }

    /// Decimal value as a 64-bit integer.
    pub fn to_i64(&self) -> i64 {
        let (lower, top) = self.split();
        let mut result: i64 = 0;
        let mut factor: i64 = 1;
        for byte in lower {
            result += i64::from(byte & LOW_NIBBLE) * factor;
            factor *= 10;
            result += i64::from(byte >> 4) * factor;
            factor *= 10;
        }
        result += i64::from(top & LOW_NIBBLE) * factor;
        factor *= 10;
        if self.is_negative() {
            -result
        } else {
            result + i64::from(top >> 4) * factor
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.to_i64() as f64
    }

    fn most_significant(&self) -> u8 {
        self.bytes.last().copied().unwrap_or_default()
    }

    fn split(&self) -> (&[u8], u8) {
        match self.bytes.split_last() {
            Some((top, lower)) => (lower, *top),
            None => (&[], 0),
        }
    }
}

impl fmt::Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lower, top) = self.split();
        let mut out = String::with_capacity(self.bytes.len() * 2);
        if self.is_negative() {
            out.push('-');
        } else {
            out.push(digit(top >> 4));
        }
        out.push(digit(top & LOW_NIBBLE));
        for byte in lower.iter().rev() {
            out.push(digit(byte >> 4));
            out.push(digit(byte & LOW_NIBBLE));
        }
        f.write_str(&out)
    }
}

impl From<[u8; INTEGER_LEN]> for Bcd {
    fn from(bytes: [u8; INTEGER_LEN]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl TryFrom<i64> for Bcd {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_integer(value)
    }
}

fn digit(nibble: u8) -> char {
    char::from(b'0' + nibble)
}
