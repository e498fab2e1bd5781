//! Wired M-Bus link-layer decoding (EN 13757-2, format class FT 1.2).
//!
//! A slave answers either with the single character `0xE5` or with a long
//! frame: `0x68 L L 0x68 C A` followed by `L` bytes starting with the CI
//! field. The decoder checks the fixed header for consistency and hands the
//! remaining bytes out as a borrowed payload; it does not verify the checksum
//! or stop byte and does not enforce the 261 byte frame limit.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{LinkLayerMessage, LongFrame, MessageType, parse_link_layer_message};
