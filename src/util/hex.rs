//! # Hex Formatting
//!
//! Hex helpers for the command banner, the response dump and the debug log,
//! plus lenient byte parsing for CLI input.
//!
//! ```rust
//! use bqmba_rs::util::hex::{encode_hex_upper, format_hex_prefixed, parse_u8_lenient};
//!
//! let data = [0x01, 0x23, 0x45, 0x67];
//! assert_eq!(encode_hex_upper(&data), "01234567");
//! assert_eq!(format_hex_prefixed(&data), "0x01 0x23 0x45 0x67");
//! assert_eq!(parse_u8_lenient("0x0B").unwrap(), 11);
//! ```

use thiserror::Error;

/// Errors from parsing a byte value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Empty value")]
    EmptyString,

    #[error("Invalid byte value {input:?}: {reason}")]
    InvalidByte { input: String, reason: String },
}

/// "01234567", as the banner shows write payloads
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// "44 02 01 00", for the debug log
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// "0x44 0x02 0x01", as the response dump shows it
pub fn format_hex_prefixed(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a byte given as `0x0B`, `0Bh` or decimal `11`.
pub fn parse_u8_lenient(input: &str) -> Result<u8, HexError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HexError::EmptyString);
    }

    let (digits, radix) = if let Some(rest) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = trimmed.strip_suffix(['h', 'H']) {
        (rest, 16)
    } else {
        (trimmed, 10)
    };

    u8::from_str_radix(digits, radix).map_err(|e| HexError::InvalidByte {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_upper() {
        assert_eq!(encode_hex_upper(&[0xAB, 0xCD, 0xEF]), "ABCDEF");
        assert_eq!(encode_hex_upper(&[]), "");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_hex_compact(&[0x44, 0x02, 0x24, 0x00]), "44 02 24 00");
    }

    #[test]
    fn test_format_prefixed() {
        assert_eq!(format_hex_prefixed(&[0x0A, 0xFF]), "0x0A 0xFF");
        assert_eq!(format_hex_prefixed(&[]), "");
    }

    #[test]
    fn test_parse_u8_lenient() {
        assert_eq!(parse_u8_lenient("0x0B").unwrap(), 0x0B);
        assert_eq!(parse_u8_lenient("0X16").unwrap(), 0x16);
        assert_eq!(parse_u8_lenient("0Bh").unwrap(), 0x0B);
        assert_eq!(parse_u8_lenient(" 11 ").unwrap(), 11);
        assert_eq!(parse_u8_lenient(""), Err(HexError::EmptyString));
        assert!(matches!(
            parse_u8_lenient("0x1FF"),
            Err(HexError::InvalidByte { .. })
        ));
        assert!(parse_u8_lenient("eleven").is_err());
    }
}
