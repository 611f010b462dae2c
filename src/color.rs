//! Hex color string parsing
//!
//! Supports `#RGB` and `#RRGGBB`, case-insensitive. Alpha is not accepted here:
//! every color a transform consumes is an opaque RGB triple.

use image::Rgb;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGB triple.
///
/// - `#RGB` - each digit is doubled (e.g., `#F00` -> red)
/// - `#RRGGBB`
///
/// # Examples
///
/// ```
/// use pixelfx::color::parse_hex;
///
/// assert_eq!(parse_hex("#F00").unwrap(), image::Rgb([255, 0, 0]));
/// assert_eq!(parse_hex("#00ff80").unwrap(), image::Rgb([0, 255, 128]));
/// assert!(parse_hex("00ff80").is_err());
/// ```
pub fn parse_hex(s: &str) -> Result<Rgb<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let digits = hex.chars().map(parse_hex_digit).collect::<Result<Vec<u8>, ColorError>>()?;

    match digits.as_slice() {
        [r, g, b] => Ok(Rgb([r * 17, g * 17, b * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgb([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0])),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Format an RGB triple as `#rrggbb`.
pub fn to_hex(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_hex("#f0a").unwrap(), Rgb([255, 0, 170]));
        assert_eq!(parse_hex("#FFF").unwrap(), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_parse_long_hex_case_insensitive() {
        assert_eq!(parse_hex("#1a2B3c").unwrap(), Rgb([0x1a, 0x2b, 0x3c]));
        assert_eq!(parse_hex("#1A2B3C").unwrap(), parse_hex("#1a2b3c").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_hex(""), Err(ColorError::Empty));
        assert_eq!(parse_hex("fff"), Err(ColorError::MissingHash));
        assert_eq!(parse_hex("#ffff"), Err(ColorError::InvalidLength(4)));
        assert_eq!(parse_hex("#ff00ff00"), Err(ColorError::InvalidLength(8)));
        assert_eq!(parse_hex("#gg0000"), Err(ColorError::InvalidHex('g')));
        assert_eq!(parse_hex("#"), Err(ColorError::InvalidLength(0)));
    }

    #[test]
    fn test_to_hex_roundtrip() {
        let c = Rgb([3, 200, 17]);
        assert_eq!(to_hex(c), "#03c811");
        assert_eq!(parse_hex(&to_hex(c)).unwrap(), c);
    }
}
