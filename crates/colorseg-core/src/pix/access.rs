//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Checked variants return `None` / an error outside the image; the
//! `_unchecked` variants index the row-major word array directly.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.index(x, y).map(|i| self.inner.data[i])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.inner.depth != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.inner.depth != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Check whether the pixel at (x, y) is fully transparent.
    ///
    /// Always `false` for images without an alpha channel and for
    /// coordinates outside the image.
    pub fn is_transparent(&self, x: u32, y: u32) -> bool {
        self.has_alpha() && self.get_pixel(x, y).is_some_and(color::is_transparent)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.index(x, y).map(|i| self.inner.data[i])
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Get RGB values at (x, y); `None` for 8-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.inner.depth != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Check whether the pixel at (x, y) is fully transparent.
    pub fn is_transparent(&self, x: u32, y: u32) -> bool {
        self.has_alpha() && self.get_pixel(x, y).is_some_and(color::is_transparent)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        let index = self.inner.index(x, y).ok_or(Error::IndexOutOfBounds {
            x,
            y,
            width: self.inner.width,
            height: self.inner.height,
        })?;
        self.inner.data[index] = val;
        Ok(())
    }

    /// Set an opaque RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 8-bit images and
    /// [`Error::IndexOutOfBounds`] outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.inner.depth != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.inner.depth.bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// Only valid for 32-bit images with spp = 4.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpp`] unless the image has an alpha channel.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if !self.has_alpha() {
            return Err(Error::InvalidSpp(self.inner.spp));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}
