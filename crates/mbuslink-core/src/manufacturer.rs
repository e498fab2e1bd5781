//! Three-letter manufacturer ids packed into 16 bits.
//!
//! Each letter occupies five bits, first letter highest, stored little-endian.
//! Field value 0 decodes to `'@'`, 1 to 26 to `'A'` to `'Z'`.

use crate::error::InvalidArgument;

const FIELD_MASK: u16 = 0x1F;
const LETTER_BASE: u8 = b'@';

pub const MANUFACTURER_ID_LEN: usize = 2;

/// Decode a packed manufacturer id.
///
/// # Examples
/// ```
/// use mbuslink_core::manufacturer::decode_manufacturer_id;
///
/// assert_eq!(decode_manufacturer_id([0x42, 0x04]), "ABB");
/// assert_eq!(decode_manufacturer_id([0x00, 0x00]), "@@@");
/// ```
pub fn decode_manufacturer_id(bytes: [u8; MANUFACTURER_ID_LEN]) -> String {
    let packed = u16::from_le_bytes(bytes);
    [packed >> 10, packed >> 5, packed]
        .into_iter()
        .map(|field| char::from(LETTER_BASE + (field & FIELD_MASK) as u8))
        .collect()
}

/// Pack a manufacturer id.
///
/// An empty id packs to `[0, 0]`, which decodes as `"@@@"`. Anything else
/// must be exactly three characters; lowercase is folded to uppercase.
/// Characters outside `A..=Z` are packed without validation and do not
/// round-trip.
pub fn encode_manufacturer_id(text: &str) -> Result<[u8; MANUFACTURER_ID_LEN], InvalidArgument> {
    if text.is_empty() {
        return Ok([0, 0]);
    }
    let length = text.chars().count();
    if length != 3 {
        return Err(InvalidArgument::ManufacturerLength { length });
    }
    let packed = text
        .chars()
        .map(|c| u32::from(c.to_ascii_uppercase()).wrapping_sub(u32::from(LETTER_BASE)) as u16)
        .fold(0u16, |acc, field| (acc << 5) | (field & FIELD_MASK));
    Ok(packed.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::{decode_manufacturer_id, encode_manufacturer_id};
    use crate::error::InvalidArgument;

    #[test]
    fn decode_known_ids() {
        assert_eq!(decode_manufacturer_id([0b0100_0010, 0b0000_0100]), "ABB");
        assert_eq!(decode_manufacturer_id([0xE6, 0x1E]), "GWF");
        assert_eq!(decode_manufacturer_id([0x36, 0x1C]), "GAV");
    }

    #[test]
    fn encode_known_ids() {
        assert_eq!(encode_manufacturer_id("ABB").unwrap(), [0x42, 0x04]);
        assert_eq!(encode_manufacturer_id("GWF").unwrap(), [0xE6, 0x1E]);
        assert_eq!(encode_manufacturer_id("GAV").unwrap(), [0x36, 0x1C]);
    }

    #[test]
    fn encode_folds_case() {
        assert_eq!(encode_manufacturer_id("gwf").unwrap(), [0xE6, 0x1E]);
    }

    #[test]
    fn empty_id_is_all_zero() {
        assert_eq!(encode_manufacturer_id("").unwrap(), [0, 0]);
        assert_eq!(decode_manufacturer_id([0, 0]), "@@@");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            encode_manufacturer_id("AB").unwrap_err(),
            InvalidArgument::ManufacturerLength { length: 2 }
        );
        assert_eq!(
            encode_manufacturer_id("ABCD").unwrap_err(),
            InvalidArgument::ManufacturerLength { length: 4 }
        );
    }

    #[test]
    fn every_letter_triple_round_trips() {
        for a in 'A'..='Z' {
            for b in 'A'..='Z' {
                for c in 'A'..='Z' {
                    let id: String = [a, b, c].into_iter().collect();
                    let packed = encode_manufacturer_id(&id).unwrap();
                    assert_eq!(decode_manufacturer_id(packed), id);
                }
            }
        }
    }

    #[test]
    fn top_bit_is_ignored_on_decode() {
        assert_eq!(decode_manufacturer_id([0x42, 0x84]), "ABB");
    }
}
