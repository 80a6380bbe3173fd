//! Hex color values
//!
//! Supports the following formats:
//! - `#RGB` - 3-digit hex, each digit is doubled
//! - `#RRGGBB` - 6-digit hex
//!
//! The canonical text form is always lowercase `#rrggbb`.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
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

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from an RGBA pixel, discarding alpha.
    pub fn from_rgba(rgba: Rgba<u8>) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2])
    }

    /// Fully opaque RGBA pixel for this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`, any case).
///
/// # Examples
///
/// ```
/// use hexel::color::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("#F00").unwrap(), Color::new(255, 0, 0));
/// assert_eq!(parse_hex_color("#1d1e23").unwrap().to_string(), "#1d1e23");
/// assert!(parse_hex_color("#12345").is_err());
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, lacks the leading `#`, has
/// the wrong number of digits, or contains non-hex characters.
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All characters are ASCII from here on, so byte indexing is safe
    let digits = hex.as_bytes();
    match digits.len() {
        3 => Ok(Color::new(
            hex_value(digits[0]) * 17,
            hex_value(digits[1]) * 17,
            hex_value(digits[2]) * 17,
        )),
        6 => Ok(Color::new(
            hex_value(digits[0]) * 16 + hex_value(digits[1]),
            hex_value(digits[2]) * 16 + hex_value(digits[3]),
            hex_value(digits[4]) * 16 + hex_value(digits[5]),
        )),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Value of an ASCII hex digit already checked with `is_ascii_hexdigit`
fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit() {
        assert_eq!(parse_hex_color("#1D1E23").unwrap(), Color::new(0x1d, 0x1e, 0x23));
    }

    #[test]
    fn test_shorthand_expands() {
        let c = parse_hex_color("#F0a").unwrap();
        assert_eq!(c, Color::new(0xff, 0x00, 0xaa));
        assert_eq!(c.to_string(), "#ff00aa");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_hex_color(""), Err(ColorError::Empty));
        assert_eq!(parse_hex_color("ff0000"), Err(ColorError::MissingHash));
        assert_eq!(parse_hex_color("#ff00"), Err(ColorError::InvalidLength(4)));
        assert_eq!(parse_hex_color("#ff000000"), Err(ColorError::InvalidLength(8)));
        assert_eq!(parse_hex_color("#gg0000"), Err(ColorError::InvalidHex('g')));
        assert_eq!(parse_hex_color("#"), Err(ColorError::InvalidLength(0)));
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert_eq!(parse_hex_color("#ff00é"), Err(ColorError::InvalidHex('é')));
    }

    #[test]
    fn test_serde_as_string() {
        let c = Color::new(0xaa, 0, 0);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#aa0000\"");
        let back: Color = serde_json::from_str("\"#AA0000\"").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_rgba_drops_alpha() {
        assert_eq!(Color::from_rgba(Rgba([1, 2, 3, 0])), Color::new(1, 2, 3));
        assert_eq!(Color::new(1, 2, 3).to_rgba(), Rgba([1, 2, 3, 255]));
    }
}
