use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color string is not in `#RRGGBBAA` form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': expected #RRGGBBAA")]
pub struct ColorError {
    pub input: String,
}

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Encode as `#RRGGBBAA` with uppercase digits
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Decode a `#RRGGBBAA` string (digits are case-insensitive)
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let err = || ColorError {
            input: input.to_string(),
        };
        let digits = input.strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
    }

    /// Scale the RGB channels by `factor`, keeping alpha
    fn scaled(&self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    fn luminance(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Terminal colors carry no alpha channel.
impl From<Rgba> for ratatui::style::Color {
    fn from(color: Rgba) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

/// The four colors the menus are drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Rgba,
    pub base: Rgba,
    pub base_focus: Rgba,
    pub text: Rgba,
}

impl ColorScheme {
    /// Build a scheme around a random base color
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let base = Rgba::opaque(rng.gen(), rng.gen(), rng.gen());
        let text = if base.luminance() > 140.0 {
            Rgba::opaque(0x10, 0x10, 0x10)
        } else {
            Rgba::opaque(0xF0, 0xF0, 0xF0)
        };
        Self {
            background: base.scaled(0.6),
            base,
            base_focus: base.scaled(1.25),
            text,
        }
    }
}
