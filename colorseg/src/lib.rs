//! colorseg - Color-similarity object segmentation
//!
//! Finds objects lying on a known background color, keeps those of a
//! plausible size and repaints them for inspection.
//!
//! # Overview
//!
//! - Pixel container and colors (re-exported from `colorseg-core`)
//! - Image I/O for PNG and JPEG ([`io`])
//! - Color distance ([`color`])
//! - Segmentation, presets and rendering ([`region`])
//! - Directory batch processing ([`batch`])
//! - An interface for external edge and circle detectors ([`detect`])
//!
//! # Example
//!
//! ```
//! use colorseg::region::{segment, SegmentOptions};
//! use colorseg::{Pix, PixelDepth, Rgb};
//!
//! let pix = Pix::new(16, 16, PixelDepth::Bit32).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//! let options = SegmentOptions::default().with_background(Rgb::BLACK);
//!
//! let result = segment(&mut pix_mut, &options).unwrap();
//! assert!(result.regions.is_empty());
//! ```

pub mod batch;
pub mod detect;

// Re-export core types (primary data structures used everywhere)
pub use colorseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use colorseg_color as color;
pub use colorseg_io as io;
pub use colorseg_region as region;
