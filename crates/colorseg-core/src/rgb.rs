//! Opaque RGB colors
//!
//! [`Rgb`] is the color type used by segmentation options: background
//! references, highlight colors and fill colors. It converts to and from
//! packed 32-bit pixels and parses `#RRGGBB` strings.

use crate::color;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Take the RGB channels of a packed pixel, ignoring alpha.
    #[inline]
    pub fn from_pixel(pixel: u32) -> Self {
        let (r, g, b) = color::extract_rgb(pixel);
        Self { r, g, b }
    }

    /// Pack into an opaque 32-bit pixel.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }

    /// Parse a hex color.
    ///
    /// Accepts `#RRGGBB`, `0xRRGGBB` and bare `RRGGBB`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not six hex digits
    /// after the optional prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }

        let value =
            u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        Ok(Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}
