//! Secondary address encoding (EN 13757-3 / EN 13757-4).
//!
//! An address is eight bytes: a 4 byte BCD device id, a packed manufacturer
//! id, a version byte and a device type byte. Wired long headers put the
//! device id first; wireless link-layer headers put the manufacturer first.
//! The layout is chosen by the caller when parsing and is not kept with the
//! value. Composing always produces the long-header order.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{HeaderLayout, SecondaryAddress};
