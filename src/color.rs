//! ARGB colors and the pixel-math helpers used by the ring.
//!
//! Colors are packed `0xAARRGGBB` values so they can be stored, compared and
//! copied freely. Terminal output has no alpha channel, so conversion to a
//! lipgloss color drops it; a fully transparent color renders as blank cells.
//!
//! ```rust
//! use bubbletea_ring::color::{adjust_alpha, lighten, Color};
//!
//! let c = Color::parse("#80402010").unwrap();
//! assert_eq!(lighten(c, 2.0), Color::argb(0x80, 0x80, 0x40, 0x20));
//! assert_eq!(adjust_alpha(c, 0.5).alpha(), 0x40);
//! ```

use lipgloss_extras::lipgloss::Color as LGColor;
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The input was empty or only whitespace.
    #[error("empty color string")]
    Empty,
    /// A `#` value that is not 6 or 8 hex digits.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    /// A name that is not in the named color table.
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// A packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color(0xFF00_0000);
    /// Default foreground of the ring.
    pub const DARK_GRAY: Color = Color(0xFF44_4444);
    /// Mid gray.
    pub const GRAY: Color = Color(0xFF88_8888);
    /// Default background of the ring.
    pub const LIGHT_GRAY: Color = Color(0xFFCC_CCCC);
    /// Opaque white.
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color(0);

    /// Builds a color from its four channels.
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Color(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32,
        )
    }

    /// Builds an opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::argb(0xFF, red, green, blue)
    }

    /// Alpha channel, 0 is fully transparent.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parses `#RRGGBB`, `#AARRGGBB` or a color name.
    ///
    /// Names are matched case-insensitively against a small fixed table
    /// (`red`, `lightgray`, `teal`, ...). `grey` spellings are accepted.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            // from_str_radix tolerates a leading sign
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorParseError::InvalidHex(s.to_string()));
            }
            let value = u32::from_str_radix(hex, 16)
                .map_err(|_| ColorParseError::InvalidHex(s.to_string()))?;
            return match hex.len() {
                6 => Ok(Color(0xFF00_0000 | value)),
                8 => Ok(Color(value)),
                _ => Err(ColorParseError::InvalidHex(s.to_string())),
            };
        }

        let name = s.to_ascii_lowercase().replace("grey", "gray");
        let color = match name.as_str() {
            "black" => Color::BLACK,
            "darkgray" => Color::DARK_GRAY,
            "gray" => Color::GRAY,
            "lightgray" => Color::LIGHT_GRAY,
            "white" => Color::WHITE,
            "red" => Color::rgb(0xFF, 0, 0),
            "green" => Color::rgb(0, 0xFF, 0),
            "blue" => Color::rgb(0, 0, 0xFF),
            "yellow" => Color::rgb(0xFF, 0xFF, 0),
            "cyan" | "aqua" => Color::rgb(0, 0xFF, 0xFF),
            "magenta" | "fuchsia" => Color::rgb(0xFF, 0, 0xFF),
            "lime" => Color::rgb(0, 0xFF, 0),
            "maroon" => Color::rgb(0x80, 0, 0),
            "navy" => Color::rgb(0, 0, 0x80),
            "olive" => Color::rgb(0x80, 0x80, 0),
            "purple" => Color::rgb(0x80, 0, 0x80),
            "silver" => Color::rgb(0xC0, 0xC0, 0xC0),
            "teal" => Color::rgb(0, 0x80, 0x80),
            "transparent" => Color::TRANSPARENT,
            _ => return Err(ColorParseError::UnknownName(s.to_string())),
        };
        Ok(color)
    }

    /// `#RRGGBB` form, without alpha, as terminals expect it.
    pub fn to_rgb_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
    }

    /// Converts to a lipgloss color for terminal rendering. Alpha is dropped.
    pub fn to_lipgloss(self) -> LGColor {
        LGColor::from(self.to_rgb_hex().as_str())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DARK_GRAY
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

/// Lightens `color` by scaling each RGB channel by `factor`.
///
/// Each channel is truncated and clamped to 255; alpha is kept. Useful factors
/// lie in `0.0..=4.0`, values outside that range are applied as-is (negative
/// results saturate at 0).
pub fn lighten(color: Color, factor: f32) -> Color {
    let scale = |c: u8| (c as f32 * factor).min(255.0) as u8;
    Color::argb(
        color.alpha(),
        scale(color.red()),
        scale(color.green()),
        scale(color.blue()),
    )
}

/// Scales the alpha channel by `factor`, rounding to the nearest integer.
///
/// The closer `factor` is to zero the more transparent the result. RGB is
/// left untouched.
pub fn adjust_alpha(color: Color, factor: f32) -> Color {
    let alpha = (color.alpha() as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color::argb(alpha, color.red(), color.green(), color.blue())
}
