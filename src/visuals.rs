//! Colors and the particle palette.
//!
//! Particles pick one of five neon colors at spawn and keep it for their
//! whole lifetime:
//!
//! | Color   | Hex       |
//! |---------|-----------|
//! | Cyan    | `#00ffff` |
//! | Yellow  | `#ffff00` |
//! | White   | `#ffffff` |
//! | Magenta | `#ff00ff` |
//! | Green   | `#00ff00` |
//!
//! Colors serialize as `#rrggbb` strings so config files stay readable.

use std::fmt;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    /// Create a color from its 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to 0.0-1.0.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }

    /// Channels as an array, in RGB order.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color '{}'", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// The fixed spawn palette.
pub const PALETTE: [Color; 5] = [
    Color::CYAN,
    Color::YELLOW,
    Color::WHITE,
    Color::MAGENTA,
    Color::GREEN,
];

/// Pick a palette entry uniformly at random.
pub fn random_palette_color<R: Rng>(rng: &mut R) -> Color {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_palette_hex_values() {
        let hex: Vec<String> = PALETTE.iter().map(|c| c.to_string()).collect();
        assert_eq!(hex, ["#00ffff", "#ffff00", "#ffffff", "#ff00ff", "#00ff00"]);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#ff00ff"), Some(Color::MAGENTA));
        assert_eq!(Color::from_hex("00FFFF"), Some(Color::CYAN));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ü0000"), None);
    }

    #[test]
    fn test_to_vec3() {
        let v = Color::YELLOW.to_vec3();
        assert_eq!(v, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::GREEN).unwrap();
        assert_eq!(json, "\"#00ff00\"");

        let back: Color = serde_json::from_str("\"#00ffff\"").unwrap();
        assert_eq!(back, Color::CYAN);

        assert!(serde_json::from_str::<Color>("\"teal\"").is_err());
    }

    #[test]
    fn test_random_palette_color_covers_palette() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let color = random_palette_color(&mut rng);
            let idx = PALETTE.iter().position(|c| *c == color).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
