use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::layout;
use super::reader::AddressReader;
use crate::bcd::{Bcd, INTEGER_LEN};
use crate::device_type::DeviceType;
use crate::error::InvalidArgument;
use crate::frame::error::FormatError;
use crate::hex;
use crate::manufacturer::{decode_manufacturer_id, encode_manufacturer_id};

/// Physical ordering of the device id and manufacturer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    /// `[device id (4)][manufacturer (2)][version][device type]`, wired long frames.
    Long,
    /// `[manufacturer (2)][device id (4)][version][device type]`, wireless link-layer header.
    Short,
}

impl HeaderLayout {
    pub fn device_id_range(self) -> Range<usize> {
        match self {
            Self::Long => layout::LONG_DEVICE_ID_RANGE,
            Self::Short => layout::SHORT_DEVICE_ID_RANGE,
        }
    }

    pub fn manufacturer_range(self) -> Range<usize> {
        match self {
            Self::Long => layout::LONG_MANUFACTURER_RANGE,
            Self::Short => layout::SHORT_MANUFACTURER_RANGE,
        }
    }
}

/// An eight byte secondary address with its decoded fields.
///
/// Equality, hashing and ordering only look at the raw bytes, so the same
/// bytes parsed under different layouts compare equal even though their
/// decoded fields differ.
///
/// # Examples
/// ```
/// use mbuslink_core::{Bcd, DeviceType, HeaderLayout, SecondaryAddress};
///
/// let address = SecondaryAddress::compose(
///     &Bcd::from_integer(12_345_678)?,
///     "ABB",
///     32,
///     DeviceType::ElectricityMeter,
/// )?;
/// let parsed = SecondaryAddress::parse(address.as_bytes(), 0, HeaderLayout::Long)?;
/// assert_eq!(parsed.manufacturer_id(), "ABB");
/// assert_eq!(parsed, address);
/// # Ok::<(), mbuslink_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SecondaryAddress {
    bytes: [u8; layout::SECONDARY_ADDRESS_LEN],
    device_id: Bcd,
    manufacturer_id: String,
    version: u8,
    device_type: DeviceType,
}

impl SecondaryAddress {
    /// Build an address in long-header byte order.
    ///
    /// `manufacturer_id` is either empty or three letters; an empty id is
    /// stored as zero and reads back as `"@@@"`.
    pub fn compose(
        device_id: &Bcd,
        manufacturer_id: &str,
        version: u8,
        device_type: DeviceType,
    ) -> Result<Self, InvalidArgument> {
        if device_id.len() != INTEGER_LEN {
            return Err(InvalidArgument::DeviceIdLength {
                length: device_id.len(),
            });
        }
        let manufacturer = encode_manufacturer_id(manufacturer_id)?;

        let mut bytes = [0u8; layout::SECONDARY_ADDRESS_LEN];
        bytes[layout::LONG_DEVICE_ID_RANGE].copy_from_slice(device_id.as_bytes());
        bytes[layout::LONG_MANUFACTURER_RANGE].copy_from_slice(&manufacturer);
        bytes[layout::VERSION_OFFSET] = version;
        bytes[layout::DEVICE_TYPE_OFFSET] = device_type.code();
        Ok(Self {
            bytes,
            device_id: device_id.clone(),
            manufacturer_id: decode_manufacturer_id(manufacturer),
            version,
            device_type,
        })
    }

    /// Same as [`SecondaryAddress::compose`] with the device id given as a
    /// number of at most eight decimal digits.
    pub fn from_device_number(
        device_number: u32,
        manufacturer_id: &str,
        version: u8,
        device_type: DeviceType,
    ) -> Result<Self, InvalidArgument> {
        let device_id = Bcd::from_integer(i64::from(device_number))?;
        Self::compose(&device_id, manufacturer_id, version, device_type)
    }

    /// Copy eight bytes at `offset` and decode them under `header`.
    pub fn parse(buffer: &[u8], offset: usize, header: HeaderLayout) -> Result<Self, FormatError> {
        let reader = AddressReader::new(buffer, offset)?;
        let address = Self::read(&reader, header)?;
        tracing::trace!(address = %address, ?header, "parsed secondary address");
        Ok(address)
    }

    fn read(reader: &AddressReader, header: HeaderLayout) -> Result<Self, FormatError> {
        Ok(Self {
            bytes: reader.bytes(),
            device_id: reader.read_device_id(header.device_id_range())?,
            manufacturer_id: reader.read_manufacturer_id(header.manufacturer_range())?,
            version: reader.read_u8(layout::VERSION_OFFSET)?,
            device_type: DeviceType::from_code(reader.read_u8(layout::DEVICE_TYPE_OFFSET)?),
        })
    }

    pub fn as_bytes(&self) -> &[u8; layout::SECONDARY_ADDRESS_LEN] {
        &self.bytes
    }

    pub fn device_id(&self) -> &Bcd {
        &self.device_id
    }

    pub fn manufacturer_id(&self) -> &str {
        &self.manufacturer_id
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
}

impl PartialEq for SecondaryAddress {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for SecondaryAddress {}

impl Hash for SecondaryAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for SecondaryAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SecondaryAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl fmt::Display for SecondaryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "manufacturer ID: {}, device ID: {}, device version: {}, device type: {}, as bytes: {}",
            self.manufacturer_id,
            self.device_id,
            self.version,
            self.device_type,
            hex::to_upper_hex(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{HeaderLayout, SecondaryAddress};
    use crate::bcd::Bcd;
    use crate::device_type::DeviceType;
    use crate::error::InvalidArgument;
    use crate::frame::error::FormatError;

    #[test]
    fn compose_keeps_fields() {
        let device_id = Bcd::from_integer(12_345_678).unwrap();
        let address =
            SecondaryAddress::compose(&device_id, "ABB", 32, DeviceType::ElectricityMeter).unwrap();
        assert_eq!(address.device_id(), &device_id);
        assert_eq!(address.device_type(), DeviceType::ElectricityMeter);
        assert_eq!(address.version(), 32);
        assert_eq!(address.manufacturer_id(), "ABB");
        assert_eq!(
            address.as_bytes(),
            &[0x78, 0x56, 0x34, 0x12, 0x42, 0x04, 0x20, 0x02]
        );
    }

    #[test]
    fn compose_real_meter() {
        let address =
            SecondaryAddress::from_device_number(90_004_130, "GAV", 60, DeviceType::ElectricityMeter)
                .unwrap();
        assert_eq!(address.device_id(), &Bcd::from_integer(90_004_130).unwrap());
        assert_eq!(address.manufacturer_id(), "GAV");
        assert_eq!(address.version(), 60);
    }

    #[test]
    fn compose_without_manufacturer() {
        let device_id = Bcd::from_integer(4711).unwrap();
        let address = SecondaryAddress::compose(&device_id, "", 17, DeviceType::WaterMeter).unwrap();
        assert_eq!(address.device_id(), &device_id);
        assert_eq!(address.device_type(), DeviceType::WaterMeter);
        assert_eq!(address.version(), 17);
        assert_eq!(address.manufacturer_id(), "@@@");
    }

    #[test]
    fn compose_normalises_case() {
        let device_id = Bcd::from_integer(1).unwrap();
        let address = SecondaryAddress::compose(&device_id, "abb", 1, DeviceType::Other).unwrap();
        assert_eq!(address.manufacturer_id(), "ABB");
    }

    #[test]
    fn compose_rejects_bad_arguments() {
        let device_id = Bcd::from_integer(1).unwrap();
        assert_eq!(
            SecondaryAddress::compose(&device_id, "AB", 1, DeviceType::Other).unwrap_err(),
            InvalidArgument::ManufacturerLength { length: 2 }
        );
        let short_id = Bcd::from_slice(&[0x01, 0x00]).unwrap();
        assert_eq!(
            SecondaryAddress::compose(&short_id, "ABB", 1, DeviceType::Other).unwrap_err(),
            InvalidArgument::DeviceIdLength { length: 2 }
        );
    }

    #[test]
    fn version_is_unsigned() {
        let buffer = [81, 37, 115, 20, 0xE6, 29, 0xC4, 6];
        let address = SecondaryAddress::parse(&buffer, 0, HeaderLayout::Long).unwrap();
        assert_eq!(address.version(), 196);
    }

    #[test]
    fn parse_long_header_at_offset() {
        let buffer = [
            104, 27, 27, 104, 8, 0, 114, 0x51, 0x25, 0x73, 0x14, 0xE6, 0x1E, 0x3C, 0x06, 48, 0, 0,
            0, 12, 120, 81, 37, 115, 20, 12, 19, 86, 0, 0, 0, 0xE3, 22,
        ];
        let address = SecondaryAddress::parse(&buffer, 7, HeaderLayout::Long).unwrap();
        assert_eq!(address.device_id(), &Bcd::from_integer(14_732_551).unwrap());
        assert_eq!(address.device_type(), DeviceType::WarmWaterMeter);
        assert_eq!(address.version(), 60);
        assert_eq!(address.manufacturer_id(), "GWF");
        assert_eq!(&address.as_bytes()[..], &buffer[7..15]);
    }

    #[test]
    fn parse_real_response_body() {
        let buffer = [
            0x72, 0x44, 0x76, 0x27, 0x16, 0xE6, 0x1E, 0x3C, 0x06, 0x45, 0x00, 0x00, 0x00, 0x0C,
            0x78, 0x44, 0x76, 0x27, 0x16, 0x0C, 0x13, 0x83, 0x00, 0x00, 0x00, 0x1A, 0x16,
        ];
        let address = SecondaryAddress::parse(&buffer, 1, HeaderLayout::Long).unwrap();
        assert_eq!(address.manufacturer_id(), "GWF");
        assert_eq!(address.version(), 60);
        assert_eq!(address.device_type(), DeviceType::WarmWaterMeter);
        assert_eq!(address.device_id().to_i32(), 16_277_644);
    }

    #[test]
    fn parse_short_header() {
        let buffer = [0xE6, 0x1E, 0x51, 0x25, 0x73, 0x14, 0x3C, 0x06];
        let address = SecondaryAddress::parse(&buffer, 0, HeaderLayout::Short).unwrap();
        assert_eq!(address.manufacturer_id(), "GWF");
        assert_eq!(address.device_id().to_i64(), 14_732_551);
        assert_eq!(address.version(), 60);
        assert_eq!(address.device_type(), DeviceType::WarmWaterMeter);
    }

    #[test]
    fn parse_rejects_short_buffer() {
        let buffer = [0u8; 10];
        let err = SecondaryAddress::parse(&buffer, 3, HeaderLayout::Long).unwrap_err();
        assert_eq!(err, FormatError::TooShort { needed: 11, actual: 10 });
    }

    #[test]
    fn compose_and_parse_round_trip() {
        let cases = [
            (0u32, "", 0u8, DeviceType::Other),
            (99_999_999, "XYZ", 255, DeviceType::Reserved(0xFF)),
            (4711, "XYZ", 17, DeviceType::WaterMeter),
            (14_732_551, "", 60, DeviceType::WarmWaterMeter),
        ];
        for (number, manufacturer, version, device_type) in cases {
            let composed =
                SecondaryAddress::from_device_number(number, manufacturer, version, device_type)
                    .unwrap();
            let parsed = SecondaryAddress::parse(composed.as_bytes(), 0, HeaderLayout::Long).unwrap();
            assert_eq!(parsed.device_id().to_i64(), i64::from(number));
            let expected = if manufacturer.is_empty() { "@@@" } else { manufacturer };
            assert_eq!(parsed.manufacturer_id(), expected);
            assert_eq!(parsed.version(), version);
            assert_eq!(parsed.device_type(), device_type);

            let recomposed = SecondaryAddress::compose(
                parsed.device_id(),
                if manufacturer.is_empty() { "" } else { parsed.manufacturer_id() },
                parsed.version(),
                parsed.device_type(),
            )
            .unwrap();
            assert_eq!(recomposed.as_bytes(), composed.as_bytes());
        }
    }

    #[test]
    fn equality_and_order_follow_bytes() {
        let bytes = [0x51, 0x25, 0x73, 0x14, 0xE6, 0x1E, 0x3C, 0x06];
        let long = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Long).unwrap();
        let short = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Short).unwrap();
        assert_eq!(long, short);
        assert_eq!(long.cmp(&short), std::cmp::Ordering::Equal);
        assert_ne!(long.manufacturer_id(), short.manufacturer_id());

        let mut higher = bytes;
        higher[7] = 0x07;
        let other = SecondaryAddress::parse(&higher, 0, HeaderLayout::Long).unwrap();
        assert!(long < other);

        let set: BTreeSet<_> = [long.clone(), other.clone(), short].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_lists_fields() {
        let bytes = [0x51, 0x25, 0x73, 0x14, 0xE6, 0x1E, 0x3C, 0x06];
        let address = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Long).unwrap();
        assert_eq!(
            address.to_string(),
            "manufacturer ID: GWF, device ID: 14732551, device version: 60, \
             device type: warm water meter, as bytes: 51257314E61E3C06"
        );
    }
}
