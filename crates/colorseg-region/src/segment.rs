//! Color-similarity segmentation
//!
//! Separates foreground objects from a known background color and keeps
//! only objects of a plausible size:
//!
//! 1. **Classify** every non-transparent pixel: it is foreground when its
//!    color is *not* similar to the background reference.
//! 2. **Grow** regions by BFS from each unvisited foreground pixel,
//!    scanning columns left to right and each column top to bottom.
//! 3. **Filter** each grown region by size; rejected regions are turned
//!    back into background.
//! 4. **Repaint** accepted regions with the highlight color and everything
//!    else (background and rejected regions) with the fill color.
//!    Transparent pixels are never read past classification and never
//!    written.
//!
//! Each region is grown into an owned coordinate list first and committed
//! or rolled back in one step once its final size is known.

use crate::error::{RegionError, RegionResult};
use crate::grid::BitGrid;
use crate::histogram::SizeHistogram;
use crate::options::{ConnectivityType, SegmentOptions};
use crate::render::{paint_background, paint_region};
use colorseg_color::pixels_are_similar;
use colorseg_core::{Box, PixMut, PixelDepth};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Summary of one grown region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStats {
    /// First pixel of the region in scan order
    pub seed: (u32, u32),
    /// Number of pixels in the region
    pub pixel_count: u32,
    /// Bounding box of the region
    pub bounds: Box,
    /// Whether the region survived the size filter
    pub accepted: bool,
}

/// Result of a segmentation call
#[derive(Debug, Clone)]
pub struct SegmentResult {
    /// Final classification: set for pixels of accepted regions only
    pub classification: BitGrid,
    /// Histogram of all grown region sizes
    pub histogram: SizeHistogram,
    /// Every grown region, in discovery order
    pub regions: Vec<RegionStats>,
    /// Number of accepted regions
    pub accepted: usize,
    /// Number of rejected regions
    pub rejected: usize,
}

impl SegmentResult {
    /// Whether (x, y) ended as part of an accepted region
    pub fn is_object(&self, x: u32, y: u32) -> bool {
        self.classification.is_set(x, y)
    }

    /// Iterate over accepted regions
    pub fn accepted_regions(&self) -> impl Iterator<Item = &RegionStats> {
        self.regions.iter().filter(|r| r.accepted)
    }

    /// Total number of pixels in accepted regions
    pub fn accepted_pixels(&self) -> u64 {
        self.accepted_regions().map(|r| r.pixel_count as u64).sum()
    }
}

/// Segment an RGB or RGBA image in place
///
/// Classifies pixels against `options.background`, grows connected
/// foreground regions, rejects regions whose size is `<= min_region_size`
/// or `>= max_region_size`, and repaints the image: accepted regions with
/// `options.highlight`, all other non-transparent pixels with
/// `options.fill`. A pixel is transparent when the image has an alpha
/// channel and the pixel's alpha is zero.
///
/// # Arguments
///
/// * `pix` - 32-bit image, modified in place
/// * `options` - Background reference, threshold, size band and colors
///
/// # Errors
///
/// Returns [`RegionError::InvalidInput`] for an empty image,
/// [`RegionError::UnsupportedDepth`] for 8-bit images, and
/// [`RegionError::InvalidParameters`] for an invalid threshold.
///
/// # Examples
///
/// ```
/// use colorseg_core::{Pix, PixelDepth, Rgb};
/// use colorseg_region::{segment, SegmentOptions};
///
/// let pix = Pix::new(7, 7, PixelDepth::Bit32).unwrap();
/// let mut pm = pix.try_into_mut().unwrap();
/// let options = SegmentOptions::default().with_background(Rgb::BLACK);
/// for y in 2..5 {
///     for x in 2..5 {
///         pm.set_rgb(x, y, 255, 255, 0).unwrap();
///     }
/// }
///
/// let result = segment(&mut pm, &options).unwrap();
/// assert_eq!(result.accepted, 1);
/// assert_eq!(result.regions[0].pixel_count, 9);
/// assert_eq!(pm.get_rgb(3, 3), Some((255, 0, 0)));
/// ```
pub fn segment(pix: &mut PixMut, options: &SegmentOptions) -> RegionResult<SegmentResult> {
    let width = pix.width();
    let height = pix.height();

    if width == 0 || height == 0 {
        return Err(RegionError::InvalidInput { width, height });
    }
    if pix.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32-bit RGB/RGBA",
            actual: pix.depth().bits(),
        });
    }
    options.validate()?;

    let background = options.background.to_pixel();
    let (mut is_object, transparent) = classify(pix, background, options.threshold)?;
    let mut visited = BitGrid::new(width, height);
    let mut histogram = SizeHistogram::new();
    let mut regions = Vec::new();

    for x in 0..width {
        for y in 0..height {
            if transparent.is_set(x, y) || visited.is_set(x, y) {
                continue;
            }
            if !is_object.is_set(x, y) {
                paint_background(pix, x, y, options.fill)?;
                continue;
            }

            let region = grow_region(
                (x, y),
                &is_object,
                &transparent,
                &mut visited,
                options.connectivity,
            )?;
            let size = u32::try_from(region.len()).unwrap_or(u32::MAX);
            let accepted = options.accepts_size(size);

            if accepted {
                paint_region(pix, &region, options.highlight)?;
            } else {
                for &(rx, ry) in &region {
                    is_object.set(rx, ry, false)?;
                }
                paint_region(pix, &region, options.fill)?;
            }

            histogram.record(size);
            let stats = RegionStats {
                seed: (x, y),
                pixel_count: size,
                bounds: region_bounds(&region),
                accepted,
            };
            trace!(?stats, "region");
            regions.push(stats);
        }
    }

    let accepted = regions.iter().filter(|r| r.accepted).count();
    let rejected = regions.len() - accepted;
    debug!(
        width,
        height,
        regions = regions.len(),
        accepted,
        rejected,
        "segmentation complete"
    );
    debug!("region size histogram: {}", histogram);

    Ok(SegmentResult {
        classification: is_object,
        histogram,
        regions,
        accepted,
        rejected,
    })
}

/// Build the foreground and transparency grids
fn classify(pix: &PixMut, background: u32, threshold: f64) -> RegionResult<(BitGrid, BitGrid)> {
    let width = pix.width();
    let height = pix.height();
    let mut is_object = BitGrid::new(width, height);
    let mut transparent = BitGrid::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if pix.is_transparent(x, y) {
                transparent.set(x, y, true)?;
                continue;
            }
            if !pixels_are_similar(pix.get_pixel_unchecked(x, y), background, threshold) {
                is_object.set(x, y, true)?;
            }
        }
    }

    Ok((is_object, transparent))
}

/// Grow one region from `seed` by breadth-first search
///
/// Pixels are marked visited when enqueued, the seed included. Returns the
/// region's pixels in discovery order.
fn grow_region(
    seed: (u32, u32),
    is_object: &BitGrid,
    transparent: &BitGrid,
    visited: &mut BitGrid,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<(u32, u32)>> {
    let width = is_object.width() as i64;
    let height = is_object.height() as i64;

    visited.set(seed.0, seed.1, true)?;
    let mut region = vec![seed];
    let mut queue = VecDeque::new();
    queue.push_back(seed);

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in connectivity.offsets() {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if transparent.is_set(nx, ny) || !is_object.is_set(nx, ny) || visited.is_set(nx, ny)
            {
                continue;
            }
            visited.set(nx, ny, true)?;
            region.push((nx, ny));
            queue.push_back((nx, ny));
        }
    }

    Ok(region)
}

fn region_bounds(region: &[(u32, u32)]) -> Box {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0, 0);
    for &(x, y) in region {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Box::from_extent(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorseg_core::{Pix, Rgb, color};

    const BG: Rgb = Rgb::new(0x8F, 0x93, 0x92);
    const FG: Rgb = Rgb::new(20, 200, 40);

    /// Create an image filled with the background color, with the listed
    /// pixels set to the foreground color
    fn create_test_image(w: u32, h: u32, fg: &[(u32, u32)]) -> PixMut {
        let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for y in 0..h {
            for x in 0..w {
                pm.set_rgb(x, y, BG.r, BG.g, BG.b).unwrap();
            }
        }
        for &(x, y) in fg {
            pm.set_rgb(x, y, FG.r, FG.g, FG.b).unwrap();
        }
        pm
    }

    fn opts(min: u32, max: u32) -> SegmentOptions {
        SegmentOptions::default().with_size_band(min, max)
    }

    #[test]
    fn test_block_accepted() {
        let block: Vec<_> = (2..5).flat_map(|x| (2..5).map(move |y| (x, y))).collect();
        let mut pm = create_test_image(7, 7, &block);
        let result = segment(&mut pm, &opts(3, 800)).unwrap();

        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.accepted, 1);
        let region = result.regions[0];
        assert_eq!(region.pixel_count, 9);
        assert_eq!(region.seed, (2, 2));
        assert_eq!(region.bounds, Box::new(2, 2, 3, 3).unwrap());

        for y in 0..7 {
            for x in 0..7 {
                let inside = (2..5).contains(&x) && (2..5).contains(&y);
                let expected = if inside { (255, 0, 0) } else { (0, 0, 0) };
                assert_eq!(pm.get_rgb(x, y), Some(expected), "pixel ({}, {})", x, y);
                assert_eq!(result.is_object(x, y), inside);
            }
        }
    }

    #[test]
    fn test_speck_rejected() {
        let mut pm = create_test_image(5, 5, &[(2, 2)]);
        let result = segment(&mut pm, &opts(3, 800)).unwrap();
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.rejected, 1);
        assert!(!result.is_object(2, 2));
        assert_eq!(pm.get_rgb(2, 2), Some((0, 0, 0)));
        assert_eq!(result.histogram.get(1), 1);
    }

    #[test]
    fn test_diagonal_neighbors_join() {
        let mut pm = create_test_image(4, 4, &[(1, 1), (2, 2)]);
        let result = segment(&mut pm, &opts(0, 800)).unwrap();
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.regions[0].pixel_count, 2);

        let mut pm = create_test_image(4, 4, &[(1, 1), (2, 2)]);
        let four = opts(0, 800).with_connectivity(ConnectivityType::FourWay);
        let result = segment(&mut pm, &four).unwrap();
        assert_eq!(result.regions.len(), 2);
    }

    #[test]
    fn test_scan_order_column_major() {
        // Seeds are discovered down each column before moving right
        let mut pm = create_test_image(6, 6, &[(4, 0), (0, 4)]);
        let result = segment(&mut pm, &opts(0, 800)).unwrap();
        let seeds: Vec<_> = result.regions.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![(0, 4), (4, 0)]);
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let mut pm = create_test_image(3, 3, &[(0, 0), (1, 0), (2, 0)]);
        pm.set_spp(4).unwrap();
        // A transparent pixel is skipped even when its RGB is foreground
        pm.set_pixel(1, 0, color::compose_rgba(FG.r, FG.g, FG.b, 0)).unwrap();
        pm.set_pixel(1, 1, 0).unwrap();

        let result = segment(&mut pm, &opts(0, 800)).unwrap();
        assert_eq!(pm.get_pixel(1, 0), Some(color::compose_rgba(FG.r, FG.g, FG.b, 0)));
        assert_eq!(pm.get_pixel(1, 1), Some(0));
        // (0,0) and (2,0) are not adjacent once (1,0) and (1,1) are excluded
        assert_eq!(result.regions.len(), 2);
        assert!(result.regions.iter().all(|r| r.pixel_count == 1));
    }

    #[test]
    fn test_partial_alpha_ignored_by_classification() {
        let pix = Pix::new(3, 1, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(4).unwrap();
        pm.set_rgba(0, 0, BG.r, BG.g, BG.b, 128).unwrap();
        pm.set_rgba(1, 0, BG.r, BG.g, BG.b, 255).unwrap();
        pm.set_rgba(2, 0, FG.r, FG.g, FG.b, 1).unwrap();

        let result = segment(&mut pm, &opts(0, 800)).unwrap();
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.regions[0].seed, (2, 0));
        assert_eq!(pm.get_pixel(0, 0), Some(color::compose_rgba(0, 0, 0, 128)));
        assert_eq!(pm.get_pixel(2, 0), Some(color::compose_rgba(255, 0, 0, 1)));
    }

    #[test]
    fn test_empty_band_rejects_everything() {
        let mut pm = create_test_image(5, 5, &[(0, 0), (1, 0), (3, 3)]);
        let result = segment(&mut pm, &opts(5, 5)).unwrap();
        assert_eq!(result.accepted, 0);
        assert_eq!(result.rejected, 2);
        assert_eq!(result.classification.count_set(), 0);
    }

    #[test]
    fn test_no_foreground() {
        let mut pm = create_test_image(4, 4, &[]);
        let result = segment(&mut pm, &SegmentOptions::default()).unwrap();
        assert!(result.regions.is_empty());
        assert!(pm.data().iter().all(|&p| p == Rgb::BLACK.to_pixel()));
    }

    #[test]
    fn test_errors() {
        let mut pm = create_test_image(2, 2, &[]);
        let bad = SegmentOptions::default().with_threshold(-5.0);
        assert!(matches!(
            segment(&mut pm, &bad),
            Err(RegionError::InvalidParameters(_))
        ));

        let gray = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let mut gm = gray.try_into_mut().unwrap();
        assert!(matches!(
            segment(&mut gm, &SegmentOptions::default()),
            Err(RegionError::UnsupportedDepth { actual: 8, .. })
        ));
    }
}
