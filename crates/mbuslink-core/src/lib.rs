//! mbuslink core library: wired M-Bus link-layer and address codecs.
//!
//! This crate turns raw M-Bus byte buffers into validated values and back:
//! the link-layer decoder (`frame`) classifies a received message and hands
//! out a borrowed payload, while the address codec (`address`) reads and
//! builds eight byte secondary addresses on top of the BCD (`bcd`) and
//! manufacturer id (`manufacturer`) codecs. Every operation is a pure function
//! of its inputs; there is no I/O, no shared state and nothing to lock.
//!
//! Errors come in two kinds:
//! - [`FormatError`] for malformed wire data, returned by decoding.
//! - [`InvalidArgument`] for values the codecs never accept from a caller.
//!
//! The variable data structure following the frame header is not
//! interpreted here; callers receive it as a slice.
//!
//! # Examples
//! ```
//! use mbuslink_core::{HeaderLayout, LinkLayerMessage, parse_link_layer_message};
//!
//! let frame = [
//!     0x68, 0x0B, 0x0B, 0x68, 0x08, 0x05, 0x72, 0x51, 0x25, 0x73, 0x14, 0xE6, 0x1E, 0x3C,
//!     0x06, 0x30, 0x00,
//! ];
//! let message = parse_link_layer_message(&frame, frame.len())?;
//! let LinkLayerMessage::LongFrameResponse(long) = message else {
//!     panic!("expected a long frame");
//! };
//! assert_eq!(long.address_field, 5);
//!
//! let address = long.long_header_address()?.expect("long header");
//! assert_eq!(address.manufacturer_id(), "GWF");
//! assert_eq!(address.device_id().to_i64(), 14_732_551);
//! # Ok::<(), mbuslink_core::FormatError>(())
//! ```

pub mod address;
pub mod bcd;
pub mod device_type;
pub mod error;
pub mod frame;
pub mod hex;
pub mod manufacturer;
pub mod report;

pub use address::{HeaderLayout, SecondaryAddress};
pub use bcd::Bcd;
pub use device_type::DeviceType;
pub use error::{Error, FormatError, InvalidArgument};
pub use frame::{LinkLayerMessage, LongFrame, MessageType, parse_link_layer_message};
pub use manufacturer::{decode_manufacturer_id, encode_manufacturer_id};
pub use report::{AddressReport, FrameReport, LongFrameSummary, REPORT_VERSION, frame_report};
