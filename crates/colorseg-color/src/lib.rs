//! colorseg-color - Color processing for segmentation
//!
//! This crate provides the color arithmetic used by the segmentation engine:
//!
//! - **Color distance** ([`distance`]): the weighted RGB distance and the
//!   similarity predicate that decides background versus foreground
//! - **Color space conversion** ([`colorspace`]): RGB to grayscale, used to
//!   feed grayscale-only feature detectors

pub mod colorspace;
pub mod distance;
pub mod error;

// Re-export core types
pub use colorseg_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use colorspace::{pix_convert_to_gray, rgb_to_gray};
pub use distance::{
    BLUE_WEIGHT, GREEN_WEIGHT, RED_WEIGHT, color_distance, colors_are_similar,
    pixels_are_similar,
};
