//! Hex formatting helpers for logs and reports.

const BYTES_PER_LINE: usize = 16;
const BYTES_PER_GROUP: usize = 8;

/// Format bytes as `0xhh` tokens, sixteen per line with a wider gap after
/// the eighth.
///
/// # Examples
/// ```
/// use mbuslink_core::hex::dump;
///
/// assert_eq!(dump(&[0x68, 0x03]), "0x68 0x03");
/// ```
pub fn dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .enumerate()
        .map(|(i, byte)| format!("{}0x{:02x}", separator(i), byte))
        .collect()
}

fn separator(index: usize) -> &'static str {
    match index {
        0 => "",
        i if i % BYTES_PER_LINE == 0 => "\n",
        i if i % BYTES_PER_GROUP == 0 => "  ",
        _ => " ",
    }
}

/// Contiguous uppercase hex, two characters per byte.
pub fn to_upper_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
