//! Packed RGB colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A color stored as `0xRRGGBB`.
///
/// Serialized as a `#rrggbb` string so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const BLACK: Color = Color(0x000000);

    /// Create a color from a hex value. Bits above the low 24 are dropped.
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// The packed `0xRRGGBB` value.
    pub const fn hex(self) -> u32 {
        self.0
    }

    pub fn r(self) -> f32 {
        ((self.0 >> 16) & 0xff) as f32 / 255.0
    }

    pub fn g(self) -> f32 {
        ((self.0 >> 8) & 0xff) as f32 / 255.0
    }

    pub fn b(self) -> f32 {
        (self.0 & 0xff) as f32 / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{0}': expected #rrggbb, 0xrrggbb or rrggbb")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 {
            return Err(ColorParseError(s.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(Color::from_hex)
            .map_err(|_| ColorParseError(s.to_string()))
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
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_color_components() {
        let color = Color::from_hex(0xbbddff);
        assert_relative_eq!(color.r(), 187.0 / 255.0);
        assert_relative_eq!(color.g(), 221.0 / 255.0);
        assert_relative_eq!(color.b(), 1.0);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("#0066dd".parse::<Color>(), Ok(Color::from_hex(0x0066dd)));
        assert_eq!("0xBBDDFF".parse::<Color>(), Ok(Color::from_hex(0xbbddff)));
        assert_eq!("ffffff".parse::<Color>(), Ok(Color::WHITE));
        assert!("#fff".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::from_hex(0x0066dd).to_string(), "#0066dd");
    }
}
