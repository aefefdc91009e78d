//! Color type

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::rgb(r, g, b)
    }

    /// Pack the color channels into `0xRRGGBB`
    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_hex(value)),
            8 => Some(Self::from_hex(value >> 8).with_alpha((value & 0xFF) as u8)),
            _ => None,
        }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.a = alpha;
        self
    }

    /// Scale the alpha channel by `factor`.
    ///
    /// The product is truncated toward zero, the same conversion a float
    /// assigned to an 8-bit channel gets.
    pub fn scale_alpha(self, factor: f32) -> Self {
        let scaled = self.a as f32 * factor;
        if scaled.is_nan() {
            return self.with_alpha(0);
        }
        self.with_alpha(scaled.clamp(0.0, 255.0) as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Convert a 0..1 value to an 8-bit channel, truncating.
pub fn unit_to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0xFF8000), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_hex(0xFF8000).to_hex(), 0xFF8000);
        // Out-of-range bits are dropped
        assert_eq!(Color::from_hex(0x0100_0000), Color::BLACK);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#00ff00"), Some(Color::GREEN));
        assert_eq!(
            Color::parse_hex("ff000080"),
            Some(Color::rgba(255, 0, 0, 0x80))
        );
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("#gg0000"), None);
    }

    #[test]
    fn test_scale_alpha_truncates() {
        assert_eq!(Color::RED.scale_alpha(0.5).a, 127);
        assert_eq!(Color::RED.scale_alpha(1.0).a, 255);
        assert_eq!(Color::RED.scale_alpha(0.0).a, 0);
        assert_eq!(Color::RED.scale_alpha(2.0).a, 255);
        assert_eq!(Color::RED.with_alpha(127).scale_alpha(1.0).a, 127);
    }

    #[test]
    fn test_unit_to_channel() {
        assert_eq!(unit_to_channel(0.5), 127);
        assert_eq!(unit_to_channel(-1.0), 0);
        assert_eq!(unit_to_channel(f32::NAN), 0);
    }
}
