//! colorseg core - Basic data structures for color segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the colorseg workspace:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`Rgb`] - An opaque 8-bit RGB color with hex parsing
//! - [`Box`] - Rectangle regions (component bounds)
//! - [`ImageFormat`] - File formats understood by the I/O crate

pub mod box_;
pub mod error;
pub mod pix;
pub mod rgb;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth};
pub use rgb::Rgb;

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
/// RGB images (spp = 3) always carry an alpha byte of 255.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Alpha value of a fully transparent pixel.
    pub const ALPHA_TRANSPARENT: u8 = 0;

    /// Alpha value of a fully opaque pixel.
    pub const ALPHA_OPAQUE: u8 = 255;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, ALPHA_OPAQUE)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Check whether a pixel is fully transparent.
    ///
    /// Only meaningful for images with an alpha channel (spp = 4).
    #[inline]
    pub fn is_transparent(pixel: u32) -> bool {
        alpha(pixel) == ALPHA_TRANSPARENT
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgba(0x12, 0x34, 0x56, 0x78);
            assert_eq!(p, 0x1234_5678);
            assert_eq!(extract_rgba(p), (0x12, 0x34, 0x56, 0x78));
            assert_eq!(extract_rgb(compose_rgb(1, 2, 3)), (1, 2, 3));
            assert_eq!(alpha(compose_rgb(1, 2, 3)), 255);
        }

        #[test]
        fn test_is_transparent() {
            assert!(is_transparent(0));
            assert!(is_transparent(compose_rgba(200, 10, 10, 0)));
            assert!(!is_transparent(compose_rgba(0, 0, 0, 1)));
        }
    }
}
