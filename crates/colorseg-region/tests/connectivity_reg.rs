//! Connectivity regression test
//!
//! Random foreground masks are segmented and compared against an
//! independent union-find labeling: every foreground pixel must end up
//! painted according to the size of its own 8-connected (or 4-connected)
//! component, and repeated runs must be byte-identical. A random layer of
//! fully transparent pixels is laid over each mask; those pixels must come
//! out unchanged and never join or bridge a component.
//!
//! ```text
//! cargo test -p colorseg-region --test connectivity_reg
//! ```

use colorseg_core::{Pix, PixMut, PixelDepth, Rgb, color};
use colorseg_region::{ConnectivityType, SegmentOptions, segment};
use colorseg_test::RegParams;
use proptest::prelude::*;

const BG: Rgb = Rgb::new(0x8F, 0x93, 0x92);
const FG: Rgb = Rgb::new(250, 250, 20);

/// A generated case: foreground mask plus a transparent layer
#[derive(Debug, Clone)]
struct MaskCase {
    w: u32,
    h: u32,
    mask: Vec<bool>,
    transparent: Vec<bool>,
}

impl MaskCase {
    /// Pixels that take part in segmentation: foreground and opaque
    fn effective_mask(&self) -> Vec<bool> {
        self.mask
            .iter()
            .zip(&self.transparent)
            .map(|(&m, &t)| m && !t)
            .collect()
    }
}

fn create_mask_image(w: u32, h: u32, mask: &[bool]) -> PixMut {
    let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    for y in 0..h {
        for x in 0..w {
            let c = if mask[(y * w + x) as usize] { FG } else { BG };
            pm.set_rgb(x, y, c.r, c.g, c.b).unwrap();
        }
    }
    pm
}

/// RGBA image of a case; transparent pixels keep their foreground or
/// background RGB with alpha 0
fn create_case_image(case: &MaskCase) -> PixMut {
    let pix = Pix::new(case.w, case.h, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.set_spp(4).unwrap();
    for y in 0..case.h {
        for x in 0..case.w {
            let i = (y * case.w + x) as usize;
            let c = if case.mask[i] { FG } else { BG };
            let alpha = if case.transparent[i] { 0 } else { 255 };
            pm.set_rgba(x, y, c.r, c.g, c.b, alpha).unwrap();
        }
    }
    pm
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Component size of every foreground pixel, by union-find
fn component_sizes(w: u32, h: u32, mask: &[bool], eight: bool) -> Vec<u32> {
    let n = (w * h) as usize;
    let mut parent: Vec<usize> = (0..n).collect();
    let idx = |x: u32, y: u32| (y * w + x) as usize;

    for y in 0..h {
        for x in 0..w {
            if !mask[idx(x, y)] {
                continue;
            }
            let mut neighbors = vec![(x + 1, y), (x, y + 1)];
            if eight {
                neighbors.push((x + 1, y + 1));
                if x > 0 {
                    neighbors.push((x - 1, y + 1));
                }
            }
            for (nx, ny) in neighbors {
                if nx < w && ny < h && mask[idx(nx, ny)] {
                    let a = find(&mut parent, idx(x, y));
                    let b = find(&mut parent, idx(nx, ny));
                    parent[a] = b;
                }
            }
        }
    }

    let mut counts = vec![0u32; n];
    for i in 0..n {
        if mask[i] {
            let r = find(&mut parent, i);
            counts[r] += 1;
        }
    }
    (0..n)
        .map(|i| {
            if mask[i] {
                let r = find(&mut parent, i);
                counts[r]
            } else {
                0
            }
        })
        .collect()
}

fn check_against_labeling(case: &MaskCase, options: &SegmentOptions) {
    let (w, h) = (case.w, case.h);
    let mask = case.effective_mask();
    let eight = options.connectivity == ConnectivityType::EightWay;
    let sizes = component_sizes(w, h, &mask, eight);
    let mut pm = create_case_image(case);
    let before = pm.data().to_vec();
    let result = segment(&mut pm, options).unwrap();

    // Every opaque foreground pixel lands in exactly one region
    let total: u64 = result.regions.iter().map(|r| r.pixel_count as u64).sum();
    assert_eq!(total, mask.iter().filter(|&&m| m).count() as u64);

    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) as usize;
            if case.transparent[i] {
                assert_eq!(pm.get_pixel(x, y), Some(before[i]), "transparent ({}, {})", x, y);
                assert!(!result.is_object(x, y));
                continue;
            }
            let size = sizes[i];
            let expected = if size > 0 && options.accepts_size(size) {
                options.highlight
            } else {
                options.fill
            };
            let painted = color::compose_rgba(expected.r, expected.g, expected.b, 255);
            assert_eq!(pm.get_pixel(x, y), Some(painted), "pixel ({}, {})", x, y);
            assert_eq!(result.is_object(x, y), size > 0 && options.accepts_size(size));
        }
    }
}

fn mask_strategy() -> impl Strategy<Value = MaskCase> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        let n = (w * h) as usize;
        (
            prop::collection::vec(prop::bool::weighted(0.45), n),
            prop::collection::vec(prop::bool::weighted(0.15), n),
        )
            .prop_map(move |(mask, transparent)| MaskCase {
                w,
                h,
                mask,
                transparent,
            })
    })
}

proptest! {
    #[test]
    fn test_eight_way_matches_labeling(case in mask_strategy(), min in 0u32..4, span in 1u32..10) {
        let options = SegmentOptions::default().with_size_band(min, min + span);
        check_against_labeling(&case, &options);
    }

    #[test]
    fn test_four_way_matches_labeling(case in mask_strategy(), min in 0u32..4, span in 1u32..10) {
        let options = SegmentOptions::default()
            .with_size_band(min, min + span)
            .with_connectivity(ConnectivityType::FourWay);
        check_against_labeling(&case, &options);
    }

    #[test]
    fn test_deterministic(case in mask_strategy()) {
        let options = SegmentOptions::default().with_size_band(1, 6);
        let mut a = create_case_image(&case);
        let mut b = create_case_image(&case);
        let ra = segment(&mut a, &options).unwrap();
        let rb = segment(&mut b, &options).unwrap();
        prop_assert_eq!(a.data(), b.data());
        prop_assert_eq!(ra.regions, rb.regions);
    }
}

#[test]
fn connectivity_reg() {
    let mut rp = RegParams::new("connectivity");

    // Checkerboard: 8-way joins everything, 4-way isolates every pixel
    let (w, h) = (6u32, 6u32);
    let mask: Vec<bool> = (0..w * h).map(|i| ((i % w) + (i / w)) % 2 == 0).collect();

    let eight = SegmentOptions::default().with_size_band(0, 1000);
    let mut pm = create_mask_image(w, h, &mask);
    let result = segment(&mut pm, &eight).expect("eight-way");
    rp.compare_values(1.0, result.regions.len() as f64, 0.0);
    rp.compare_values(18.0, result.regions[0].pixel_count as f64, 0.0);

    let four = eight.clone().with_connectivity(ConnectivityType::FourWay);
    let mut pm = create_mask_image(w, h, &mask);
    let result = segment(&mut pm, &four).expect("four-way");
    rp.compare_values(18.0, result.regions.len() as f64, 0.0);
    rp.compare_values(18.0, result.histogram.get(1) as f64, 0.0);

    // Two blocks one pixel apart never merge
    let mut mask = vec![false; 100];
    for y in 2..5 {
        for x in 1..4 {
            mask[y * 10 + x] = true;
            mask[y * 10 + x + 4] = true;
        }
    }
    let mut pm = create_mask_image(10, 10, &mask);
    let result = segment(&mut pm, &eight).expect("gap");
    rp.compare_values(2.0, result.regions.len() as f64, 0.0);

    assert!(rp.cleanup(), "connectivity regression test failed");
}
