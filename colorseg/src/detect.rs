//! External feature detectors
//!
//! Edge and circle detection are delegated to an external vision toolkit.
//! This module only defines the seam: a [`FeatureDetector`] receives an
//! 8-bit grayscale image and returns 8-bit grayscale maps of the same size.
//! No detector is shipped with this crate.

use anyhow::{Context, ensure};
use colorseg_color::pix_convert_to_gray;
use colorseg_core::{Pix, PixelDepth};

/// An edge and circle detector working on 8-bit grayscale images
pub trait FeatureDetector {
    /// Produce an edge map of `gray`
    fn detect_edges(&self, gray: &Pix) -> anyhow::Result<Pix>;

    /// Produce a map of the circles found in `gray`
    fn detect_circles(&self, gray: &Pix) -> anyhow::Result<Pix>;
}

/// Maps produced by [`run_feature_detection`]
#[derive(Debug, Clone)]
pub struct FeatureMaps {
    /// Grayscale input handed to the detector
    pub gray: Pix,
    pub edges: Pix,
    pub circles: Pix,
}

/// Convert `pix` to grayscale and run both detectors on it
///
/// # Errors
///
/// Fails if the conversion or a detector fails, or if a detector returns
/// something other than an 8-bit map of the input's size.
pub fn run_feature_detection<D: FeatureDetector + ?Sized>(
    detector: &D,
    pix: &Pix,
) -> anyhow::Result<FeatureMaps> {
    let gray = pix_convert_to_gray(pix).context("grayscale conversion failed")?;

    let edges = detector
        .detect_edges(&gray)
        .context("edge detection failed")?;
    check_map("edge", &gray, &edges)?;

    let circles = detector
        .detect_circles(&gray)
        .context("circle detection failed")?;
    check_map("circle", &gray, &circles)?;

    Ok(FeatureMaps {
        gray,
        edges,
        circles,
    })
}

fn check_map(kind: &str, gray: &Pix, map: &Pix) -> anyhow::Result<()> {
    ensure!(
        map.depth() == PixelDepth::Bit8,
        "{} map must be 8-bit, got {} bpp",
        kind,
        map.depth().bits()
    );
    ensure!(
        map.width() == gray.width() && map.height() == gray.height(),
        "{} map is {}x{}, expected {}x{}",
        kind,
        map.width(),
        map.height(),
        gray.width(),
        gray.height()
    );
    Ok(())
}
