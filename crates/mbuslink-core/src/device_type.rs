//! Device type (medium) codes of EN 13757-3.

use std::fmt;

/// Medium announced in the last byte of a secondary address.
///
/// Codes without an assigned medium resolve to [`DeviceType::Reserved`],
/// which keeps the raw byte so an address can be rebuilt unchanged.
///
/// # Examples
/// ```
/// use mbuslink_core::DeviceType;
///
/// assert_eq!(DeviceType::from_code(0x07), DeviceType::WaterMeter);
/// assert_eq!(DeviceType::from_code(0x3F), DeviceType::Reserved(0x3F));
/// assert_eq!(DeviceType::Reserved(0x3F).code(), 0x3F);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Other,
    OilMeter,
    ElectricityMeter,
    GasMeter,
    HeatMeter,
    SteamMeter,
    WarmWaterMeter,
    WaterMeter,
    HeatCostAllocator,
    CompressedAir,
    CoolingMeterOutlet,
    CoolingMeterInlet,
    HeatMeterInlet,
    HeatCoolingMeter,
    BusSystemComponent,
    UnknownMedium,
    HotWaterMeter,
    ColdWaterMeter,
    DualRegisterWaterMeter,
    PressureMeter,
    AdConverter,
    SmokeDetector,
    RoomSensor,
    GasDetector,
    Breaker,
    Valve,
    CustomerUnit,
    WasteWaterMeter,
    Garbage,
    CommunicationController,
    UnidirectionalRepeater,
    BidirectionalRepeater,
    RadioConverterSystemSide,
    RadioConverterMeterSide,
    Reserved(u8),
}

const TABLE: [(u8, DeviceType); 34] = [
    (0x00, DeviceType::Other),
    (0x01, DeviceType::OilMeter),
    (0x02, DeviceType::ElectricityMeter),
    (0x03, DeviceType::GasMeter),
    (0x04, DeviceType::HeatMeter),
    (0x05, DeviceType::SteamMeter),
    (0x06, DeviceType::WarmWaterMeter),
    (0x07, DeviceType::WaterMeter),
    (0x08, DeviceType::HeatCostAllocator),
    (0x09, DeviceType::CompressedAir),
    (0x0A, DeviceType::CoolingMeterOutlet),
    (0x0B, DeviceType::CoolingMeterInlet),
    (0x0C, DeviceType::HeatMeterInlet),
    (0x0D, DeviceType::HeatCoolingMeter),
    (0x0E, DeviceType::BusSystemComponent),
    (0x0F, DeviceType::UnknownMedium),
    (0x15, DeviceType::HotWaterMeter),
    (0x16, DeviceType::ColdWaterMeter),
    (0x17, DeviceType::DualRegisterWaterMeter),
    (0x18, DeviceType::PressureMeter),
    (0x19, DeviceType::AdConverter),
    (0x1A, DeviceType::SmokeDetector),
    (0x1B, DeviceType::RoomSensor),
    (0x1C, DeviceType::GasDetector),
    (0x20, DeviceType::Breaker),
    (0x21, DeviceType::Valve),
    (0x25, DeviceType::CustomerUnit),
    (0x28, DeviceType::WasteWaterMeter),
    (0x29, DeviceType::Garbage),
    (0x31, DeviceType::CommunicationController),
    (0x32, DeviceType::UnidirectionalRepeater),
    (0x33, DeviceType::BidirectionalRepeater),
    (0x36, DeviceType::RadioConverterSystemSide),
    (0x37, DeviceType::RadioConverterMeterSide),
];

impl DeviceType {
    pub fn from_code(code: u8) -> Self {
        TABLE
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, device_type)| *device_type)
            .unwrap_or(Self::Reserved(code))
    }

    pub fn code(self) -> u8 {
        if let Self::Reserved(code) = self {
            return code;
        }
        TABLE
            .iter()
            .find(|(_, device_type)| *device_type == self)
            .map(|(code, _)| *code)
            .unwrap_or_default()
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Reserved(_))
    }
}

impl From<u8> for DeviceType {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Other => "other",
            Self::OilMeter => "oil meter",
            Self::ElectricityMeter => "electricity meter",
            Self::GasMeter => "gas meter",
            Self::HeatMeter => "heat meter",
            Self::SteamMeter => "steam meter",
            Self::WarmWaterMeter => "warm water meter",
            Self::WaterMeter => "water meter",
            Self::HeatCostAllocator => "heat cost allocator",
            Self::CompressedAir => "compressed air",
            Self::CoolingMeterOutlet => "cooling meter (outlet)",
            Self::CoolingMeterInlet => "cooling meter (inlet)",
            Self::HeatMeterInlet => "heat meter (inlet)",
            Self::HeatCoolingMeter => "heat/cooling meter",
            Self::BusSystemComponent => "bus/system component",
            Self::UnknownMedium => "unknown medium",
            Self::HotWaterMeter => "hot water meter",
            Self::ColdWaterMeter => "cold water meter",
            Self::DualRegisterWaterMeter => "dual register water meter",
            Self::PressureMeter => "pressure meter",
            Self::AdConverter => "A/D converter",
            Self::SmokeDetector => "smoke detector",
            Self::RoomSensor => "room sensor",
            Self::GasDetector => "gas detector",
            Self::Breaker => "breaker (electricity)",
            Self::Valve => "valve (gas or water)",
            Self::CustomerUnit => "customer unit (display)",
            Self::WasteWaterMeter => "waste water meter",
            Self::Garbage => "garbage",
            Self::CommunicationController => "communication controller",
            Self::UnidirectionalRepeater => "unidirectional repeater",
            Self::BidirectionalRepeater => "bidirectional repeater",
            Self::RadioConverterSystemSide => "radio converter (system side)",
            Self::RadioConverterMeterSide => "radio converter (meter side)",
            Self::Reserved(code) => return write!(f, "reserved (0x{code:02X})"),
        };
        f.write_str(name)
    }
}
