//! Weighted RGB color distance
//!
//! The distance between two colors is a weighted Euclidean norm over the
//! channel differences:
//!
//! ```text
//! d(a, b) = sqrt(2 * dR^2 + 3 * dG^2 + 4 * dB^2)
//! ```
//!
//! The weights are not a standard color-difference formula; segmentation
//! output depends on them exactly. Alpha never participates.

use colorseg_core::Rgb;

/// Weight applied to the squared red difference
pub const RED_WEIGHT: i32 = 2;

/// Weight applied to the squared green difference
pub const GREEN_WEIGHT: i32 = 3;

/// Weight applied to the squared blue difference
pub const BLUE_WEIGHT: i32 = 4;

/// Compute the weighted distance between two colors.
///
/// Always defined and non-negative; the maximum (black vs. white) is
/// `255 * 3 = 765`.
///
/// # Examples
///
/// ```
/// use colorseg_color::color_distance;
/// use colorseg_core::Rgb;
///
/// let d = color_distance(Rgb::new(0, 0, 0), Rgb::new(0, 0, 10));
/// assert_eq!(d, 20.0);
/// ```
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;

    let sum = RED_WEIGHT * dr * dr + BLUE_WEIGHT * db * db + GREEN_WEIGHT * dg * dg;
    (sum as f64).sqrt()
}

/// Check whether two colors are within `max_delta` of each other.
///
/// The comparison is strict: a distance exactly equal to `max_delta` is
/// *not* similar.
#[inline]
pub fn colors_are_similar(a: Rgb, b: Rgb, max_delta: f64) -> bool {
    color_distance(a, b) < max_delta
}

/// Packed-pixel form of [`colors_are_similar`]; alpha bytes are ignored.
#[inline]
pub fn pixels_are_similar(a: u32, b: u32, max_delta: f64) -> bool {
    colors_are_similar(Rgb::from_pixel(a), Rgb::from_pixel(b), max_delta)
}
