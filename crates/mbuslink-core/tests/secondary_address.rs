use std::collections::HashSet;

use mbuslink_core::{Bcd, DeviceType, HeaderLayout, InvalidArgument, SecondaryAddress};

#[test]
fn compose_then_parse_keeps_fields() {
    for version in [0u8, 1, 127, 128, 255] {
        for manufacturer in ["", "XYZ"] {
            for device_type in [DeviceType::GasMeter, DeviceType::Reserved(0x40)] {
                let device_id = Bcd::from_integer(31_415_926).unwrap();
                let composed =
                    SecondaryAddress::compose(&device_id, manufacturer, version, device_type)
                        .unwrap();
                let parsed =
                    SecondaryAddress::parse(composed.as_bytes(), 0, HeaderLayout::Long).unwrap();

                assert_eq!(parsed.device_id(), &device_id);
                assert_eq!(parsed.version(), version);
                assert_eq!(parsed.device_type(), device_type);
                if manufacturer.is_empty() {
                    assert_eq!(parsed.manufacturer_id(), "@@@");
                } else {
                    assert_eq!(parsed.manufacturer_id(), manufacturer);
                }
            }
        }
    }
}

#[test]
fn parse_then_compose_is_byte_exact() {
    let bytes = [0x44, 0x76, 0x27, 0x16, 0xE6, 0x1E, 0x3C, 0x06];
    let parsed = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Long).unwrap();
    let composed = SecondaryAddress::compose(
        parsed.device_id(),
        parsed.manufacturer_id(),
        parsed.version(),
        parsed.device_type(),
    )
    .unwrap();
    assert_eq!(composed.as_bytes(), &bytes);
}

#[test]
fn layouts_disagree_on_fields_not_identity() {
    let bytes = [0xE6, 0x1E, 0x44, 0x76, 0x27, 0x16, 0x01, 0x07];
    let short = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Short).unwrap();
    let long = SecondaryAddress::parse(&bytes, 0, HeaderLayout::Long).unwrap();

    assert_eq!(short.manufacturer_id(), "GWF");
    assert_eq!(short.device_id().to_i64(), 16_277_644);
    assert_ne!(long.manufacturer_id(), short.manufacturer_id());
    assert_eq!(long, short);

    let set: HashSet<_> = [long, short].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn ordering_is_total_over_bytes() {
    let mut addresses: Vec<_> = (0u32..50)
        .map(|n| {
            SecondaryAddress::from_device_number(n * 7_919, "ABB", (n % 3) as u8, DeviceType::Other)
                .unwrap()
        })
        .collect();
    addresses.sort();
    for pair in addresses.windows(2) {
        assert!(pair[0].as_bytes() < pair[1].as_bytes());
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn device_number_out_of_range() {
    let err = SecondaryAddress::from_device_number(100_000_000, "ABB", 1, DeviceType::Other)
        .unwrap_err();
    assert_eq!(err, InvalidArgument::BcdOutOfRange { value: 100_000_000 });
}
