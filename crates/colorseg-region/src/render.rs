//! Repainting of segmented pixels
//!
//! Painting replaces the RGB channels and keeps each pixel's alpha, so a
//! painted RGBA image keeps its transparency layout.

use crate::error::RegionResult;
use crate::grid::BitGrid;
use colorseg_core::{Pix, PixMut, PixelDepth, Rgb, color};

/// Paint one pixel, keeping its alpha
#[inline]
fn paint_pixel(pix: &mut PixMut, x: u32, y: u32, rgb: Rgb) -> RegionResult<()> {
    let alpha = pix.get_pixel(x, y).map(color::alpha).unwrap_or(color::ALPHA_OPAQUE);
    pix.set_pixel(x, y, color::compose_rgba(rgb.r, rgb.g, rgb.b, alpha))?;
    Ok(())
}

/// Paint every pixel of a region
///
/// # Errors
///
/// Returns an error if a coordinate lies outside the image.
pub fn paint_region(pix: &mut PixMut, coords: &[(u32, u32)], rgb: Rgb) -> RegionResult<()> {
    for &(x, y) in coords {
        paint_pixel(pix, x, y, rgb)?;
    }
    Ok(())
}

/// Paint a single background pixel
///
/// # Errors
///
/// Returns an error if (x, y) lies outside the image.
pub fn paint_background(pix: &mut PixMut, x: u32, y: u32, rgb: Rgb) -> RegionResult<()> {
    paint_pixel(pix, x, y, rgb)
}

/// Render a grid as an 8-bit mask: 255 where set, 0 elsewhere
///
/// # Errors
///
/// Returns an error if the grid is empty.
pub fn grid_to_mask(grid: &BitGrid) -> RegionResult<Pix> {
    let mut data = vec![0u32; grid.width() as usize * grid.height() as usize];
    let width = grid.width() as usize;
    for (x, y) in grid.iter_set() {
        data[y as usize * width + x as usize] = 255;
    }
    Ok(Pix::from_data(
        grid.width(),
        grid.height(),
        PixelDepth::Bit8,
        1,
        data,
    )?)
}
