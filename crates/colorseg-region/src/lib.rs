//! colorseg-region - Color-similarity region segmentation
//!
//! This crate finds objects on a known background color:
//!
//! - **Segmentation** ([`segment`]) - classify pixels by color distance to
//!   the background, grow connected regions, filter them by size and
//!   repaint the image
//! - **Options and presets** ([`SegmentOptions`], [`Preset`]) - the
//!   background reference, threshold, accept band and paint colors
//! - **Rendering** ([`render`]) - repaint helpers and mask output
//! - **Support types** - [`BitGrid`] per-pixel flags and the
//!   [`SizeHistogram`] of region sizes
//!
//! # Examples
//!
//! ```
//! use colorseg_core::{Pix, PixelDepth};
//! use colorseg_region::{segment, Preset, SegmentOptions};
//!
//! let pix = Pix::new(32, 32, PixelDepth::Bit32).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! let options = SegmentOptions::from_preset(Preset::GrayBackground);
//! let result = segment(&mut pix_mut, &options).unwrap();
//!
//! // An all-black image against a gray background is one giant region,
//! // rejected by the upper size bound.
//! assert_eq!(result.regions.len(), 1);
//! assert_eq!(result.accepted, 0);
//! ```

pub mod error;
pub mod grid;
pub mod histogram;
pub mod options;
pub mod render;
pub mod segment;

// Re-export core types
pub use colorseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use grid::BitGrid;
pub use histogram::{HISTOGRAM_BUCKETS, SizeHistogram};
pub use options::{ConnectivityType, Preset, SegmentOptions};
pub use render::{grid_to_mask, paint_background, paint_region};
pub use segment::{RegionStats, SegmentResult, segment};
