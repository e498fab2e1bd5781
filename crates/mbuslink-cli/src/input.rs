use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::glob;

use crate::CliError;

/// Where the bytes of a command come from.
pub struct ByteSource {
    pub hex: Vec<String>,
    pub input: Option<PathBuf>,
    pub binary: bool,
}

impl ByteSource {
    pub fn read(&self) -> Result<Vec<u8>, CliError> {
        match (&self.input, self.hex.is_empty()) {
            (Some(_), false) => Err(CliError::new(
                "hex bytes and --input are mutually exclusive",
                Some("pass the bytes inline or in a file, not both".to_string()),
            )),
            (None, true) => Err(CliError::new(
                "no input bytes",
                Some("pass hex bytes (e.g. `E5`) or --input <file>".to_string()),
            )),
            (None, false) => parse_hex(&self.hex.join(" ")),
            (Some(input), true) => {
                let path = resolve_input_path(input)?;
                read_file(&path, self.binary)
            }
        }
    }
}

fn read_file(path: &Path, binary: bool) -> Result<Vec<u8>, CliError> {
    if !path.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", path.display()),
            Some("use a file holding hex text, or raw bytes with --binary".to_string()),
        ));
    }
    if binary {
        return fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
            .map_err(Into::into);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    parse_hex(&text)
}

/// Parse hex text such as `68 1B 1B 68`, `0x68,0x1b` or `681b1b68`.
///
/// A single digit token is one byte (`8` is `0x08`); longer tokens must have
/// an even number of digits.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, CliError> {
    let mut digits = String::with_capacity(text.len());
    for token in text.split(|c: char| c.is_whitespace() || c == ',' || c == ':') {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        match token.len() {
            1 => digits.push('0'),
            len if len % 2 != 0 => {
                return Err(CliError::new(
                    format!("odd number of hex digits in '{}'", token),
                    Some("write each byte as two digits, e.g. `06 81`".to_string()),
                ));
            }
            _ => {}
        }
        digits.push_str(token);
    }

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(CliError::new(
            format!("invalid hex digit '{}'", bad),
            Some("bytes are written as hex pairs, e.g. `68 1B 1B 68`".to_string()),
        ));
    }

    let bytes = digits.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks(2) {
        let pair = std::str::from_utf8(pair).context("hex input is not ASCII")?;
        let byte = u8::from_str_radix(pair, 16).context("invalid hex pair")?;
        out.push(byte);
    }
    Ok(out)
}

pub fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single frame file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::parse_hex;

    #[test]
    fn parses_spaced_pairs() {
        assert_eq!(parse_hex("68 1B 1b 68").unwrap(), vec![0x68, 0x1B, 0x1B, 0x68]);
    }

    #[test]
    fn parses_prefixed_and_packed_forms() {
        assert_eq!(parse_hex("0x68,0x1b").unwrap(), vec![0x68, 0x1B]);
        assert_eq!(parse_hex("e5").unwrap(), vec![0xE5]);
        assert_eq!(parse_hex("681b1b68").unwrap(), vec![0x68, 0x1B, 0x1B, 0x68]);
        assert_eq!(parse_hex("8 0x5").unwrap(), vec![0x08, 0x05]);
    }

    #[test]
    fn multiline_text_is_accepted() {
        assert_eq!(parse_hex("0x68 0x03\n0x03 0x68\n").unwrap(), vec![0x68, 0x03, 0x03, 0x68]);
    }

    #[test]
    fn rejects_odd_length_runs() {
        let err = parse_hex("68 681").unwrap_err();
        assert!(err.message.contains("odd number of hex digits in '681'"));
        let err = parse_hex("0x123").unwrap_err();
        assert!(err.message.contains("'123'"));
    }

    #[test]
    fn rejects_non_hex() {
        let err = parse_hex("68 zz").unwrap_err();
        assert!(err.message.contains("invalid hex digit"));
    }
}
