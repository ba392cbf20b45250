//! Color space conversion
//!
//! Only the RGB to grayscale conversion is needed here: feature detectors
//! (edges, circles) consume 8-bit gray images.

use crate::{ColorError, ColorResult};
use colorseg_core::{Pix, PixelDepth, color};

/// Rec.601 luma weights, scaled by 1000.
const GRAY_WEIGHTS: (u32, u32, u32) = (299, 587, 114);

/// Convert an RGB triple to an 8-bit gray value.
///
/// Uses Rec.601 luma weights with rounding to nearest.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let (wr, wg, wb) = GRAY_WEIGHTS;
    let sum = wr * r as u32 + wg * g as u32 + wb * b as u32;
    ((sum + 500) / 1000).min(255) as u8
}

/// Convert a 32-bit image to an 8-bit grayscale image.
///
/// Alpha is dropped. An 8-bit input is returned as a shared clone.
///
/// # Errors
///
/// Returns an error if the output image cannot be created.
pub fn pix_convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => Ok(pix.clone()),
        PixelDepth::Bit32 => {
            let data = pix
                .data()
                .iter()
                .map(|&p| {
                    let (r, g, b) = color::extract_rgb(p);
                    rgb_to_gray(r, g, b) as u32
                })
                .collect();
            Pix::from_data(pix.width(), pix.height(), PixelDepth::Bit8, 1, data)
                .map_err(ColorError::Core)
        }
    }
}
