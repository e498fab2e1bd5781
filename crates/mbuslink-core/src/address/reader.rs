use std::ops::Range;

use super::layout;
use crate::bcd::{Bcd, INTEGER_LEN};
use crate::frame::error::FormatError;
use crate::manufacturer::{MANUFACTURER_ID_LEN, decode_manufacturer_id};

pub struct AddressReader {
    bytes: [u8; layout::SECONDARY_ADDRESS_LEN],
}

impl AddressReader {
    /// Copy the eight address bytes starting at `offset`.
    pub fn new(buffer: &[u8], offset: usize) -> Result<Self, FormatError> {
        let needed = offset.saturating_add(layout::SECONDARY_ADDRESS_LEN);
        let slice = buffer
            .get(offset..needed)
            .ok_or(FormatError::TooShort {
                needed,
                actual: buffer.len(),
            })?;
        let mut bytes = [0u8; layout::SECONDARY_ADDRESS_LEN];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> [u8; layout::SECONDARY_ADDRESS_LEN] {
        self.bytes
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FormatError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(FormatError::TooShort {
                needed: offset + 1,
                actual: layout::SECONDARY_ADDRESS_LEN,
            })
    }

    pub fn read_device_id(&self, range: Range<usize>) -> Result<Bcd, FormatError> {
        self.read_array::<INTEGER_LEN>(range).map(Bcd::from)
    }

    pub fn read_manufacturer_id(&self, range: Range<usize>) -> Result<String, FormatError> {
        self.read_array::<MANUFACTURER_ID_LEN>(range)
            .map(decode_manufacturer_id)
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], FormatError> {
        self.bytes
            .get(range.clone())
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(FormatError::TooShort {
                needed: range.end,
                actual: layout::SECONDARY_ADDRESS_LEN,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::AddressReader;
    use crate::address::layout;
    use crate::frame::error::FormatError;

    #[test]
    fn copies_eight_bytes_at_offset() {
        let buffer = [0xFF, 1, 2, 3, 4, 5, 6, 7, 8, 0xFF];
        let reader = AddressReader::new(&buffer, 1).unwrap();
        assert_eq!(reader.bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let buffer = [0u8; 9];
        let err = AddressReader::new(&buffer, 2).err().unwrap();
        assert_eq!(err, FormatError::TooShort { needed: 10, actual: 9 });
        assert!(AddressReader::new(&buffer, usize::MAX).is_err());
    }

    #[test]
    fn field_reads_follow_ranges() {
        let buffer = [0x51, 0x25, 0x73, 0x14, 0xE6, 0x1E, 0x3C, 0x06];
        let reader = AddressReader::new(&buffer, 0).unwrap();
        let id = reader.read_device_id(layout::LONG_DEVICE_ID_RANGE).unwrap();
        assert_eq!(id.to_i64(), 14_732_551);
        let manufacturer = reader
            .read_manufacturer_id(layout::LONG_MANUFACTURER_RANGE)
            .unwrap();
        assert_eq!(manufacturer, "GWF");
        assert_eq!(reader.read_u8(layout::VERSION_OFFSET).unwrap(), 0x3C);
        assert!(reader.read_device_id(5..9).is_err());
    }
}
