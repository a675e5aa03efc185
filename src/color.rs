//! 8-bit RGB color used for foreground and background styling.
//!
//! Rich-text documents carry colors through an RTF color table, which
//! stores one byte per channel, so colors are kept at that precision to
//! round-trip exactly.
//!
//! # Examples
//!
//! ```
//! use quillpad::Rgb;
//!
//! let accent = Rgb::from_hex("#1a1a2e").unwrap();
//! assert_eq!(accent.to_hex(), "#1A1A2E");
//! assert_eq!(Rgb::from_hex("#f00"), Some(Rgb::RED));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Opaque RGB color with one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Create a color from channel bytes.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB) and 6-char (#RRGGBB) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Format as `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#FF0000"), Some(Rgb::RED));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::GREEN));
        assert_eq!(Rgb::from_hex("#00F"), Some(Rgb::BLUE));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    #[test]
    fn test_to_hex_and_display() {
        let c = Rgb::new(26, 26, 46);
        assert_eq!(c.to_hex(), "#1A1A2E");
        assert_eq!(c.to_string(), "#1A1A2E");
    }

    #[test]
    fn test_from_str_error() {
        let err = "teal".parse::<Rgb>().unwrap_err();
        assert!(matches!(err, Error::InvalidColor(s) if s == "teal"));
        assert_eq!("#808080".parse::<Rgb>().unwrap(), Rgb::GRAY);
    }
}
