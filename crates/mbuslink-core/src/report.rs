//! Serializable summaries of decoded frames and addresses.

use serde::{Deserialize, Serialize};

use crate::address::{HeaderLayout, SecondaryAddress};
use crate::frame::error::FormatError;
use crate::frame::{LinkLayerMessage, LongFrame, MessageType, parse_link_layer_message};
use crate::hex;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Summary of one decoded link-layer message.
///
/// # Examples
/// ```
/// use mbuslink_core::{MessageType, frame_report};
///
/// let report = frame_report(&[0xE5])?;
/// assert_eq!(report.message_type, MessageType::SingleCharacter);
/// assert!(report.long_frame.is_none());
/// # Ok::<(), mbuslink_core::FormatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub message_type: MessageType,
    /// Leading byte that selected `message_type`.
    pub start_byte: u8,
    /// Number of bytes decoded.
    pub frame_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_frame: Option<LongFrameSummary>,
}

/// Header fields of a long frame response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongFrameSummary {
    pub control_field: u8,
    pub address_field: u8,
    pub access_demand: bool,
    pub data_flow_control: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_field: Option<u8>,
    pub payload_offset: usize,
    pub payload_len: usize,
    /// Payload bytes as contiguous uppercase hex.
    pub payload_hex: String,
    /// Present when the CI field announces a long header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_address: Option<AddressReport>,
}

/// Decoded fields of a secondary address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReport {
    pub layout: HeaderLayout,
    pub manufacturer_id: String,
    /// Device id as printed digits, leading zeros kept.
    pub device_id: String,
    pub version: u8,
    pub device_type: String,
    pub device_type_code: u8,
    pub bytes_hex: String,
}

impl AddressReport {
    pub fn new(address: &SecondaryAddress, layout: HeaderLayout) -> Self {
        let device_type = address.device_type();
        Self {
            layout,
            manufacturer_id: address.manufacturer_id().to_string(),
            device_id: address.device_id().to_string(),
            version: address.version(),
            device_type: device_type.to_string(),
            device_type_code: device_type.code(),
            bytes_hex: hex::to_upper_hex(address.as_bytes()),
        }
    }
}

impl LongFrameSummary {
    pub fn new(frame: &LongFrame<'_>) -> Self {
        let range = frame.payload_range();
        let secondary_address = match frame.long_header_address() {
            Ok(address) => address.map(|address| AddressReport::new(&address, HeaderLayout::Long)),
            Err(err) => {
                tracing::debug!(error = %err, "long header too short for a secondary address");
                None
            }
        };
        Self {
            control_field: frame.control_field,
            address_field: frame.address_field,
            access_demand: frame.access_demand(),
            data_flow_control: frame.data_flow_control(),
            ci_field: frame.ci_field(),
            payload_offset: range.start,
            payload_len: range.len(),
            payload_hex: hex::to_upper_hex(frame.payload),
            secondary_address,
        }
    }
}

/// Decode `buffer` as one complete link-layer message and summarise it.
pub fn frame_report(buffer: &[u8]) -> Result<FrameReport, FormatError> {
    let message = parse_link_layer_message(buffer, buffer.len())?;
    let long_frame = match &message {
        LinkLayerMessage::SingleCharacterAck => None,
        LinkLayerMessage::LongFrameResponse(frame) => Some(LongFrameSummary::new(frame)),
    };
    let message_type = message.message_type();
    Ok(FrameReport {
        report_version: REPORT_VERSION,
        message_type,
        start_byte: message_type.start_byte(),
        frame_len: buffer.len(),
        long_frame,
    })
}
