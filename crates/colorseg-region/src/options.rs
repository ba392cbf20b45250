//! Segmentation options and presets
//!
//! [`SegmentOptions`] carries every tunable of one segmentation call. The
//! two named [`Preset`]s reproduce the configurations used for the two
//! kinds of source imagery; any field can be overridden afterwards with the
//! `with_*` builders.

use crate::error::{RegionError, RegionResult};
use colorseg_core::Rgb;
use std::fmt;
use std::str::FromStr;

/// Pixel neighborhood used when growing regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        match self {
            Self::FourWay => &FOUR,
            Self::EightWay => &EIGHT,
        }
    }
}

/// Named configuration profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// Light beige background (#D7D4C3); small objects painted white
    LightBackground,
    /// Mid-gray background (#8F9392); objects painted red
    #[default]
    GrayBackground,
}

impl Preset {
    /// All presets, in display order
    pub const ALL: [Preset; 2] = [Preset::LightBackground, Preset::GrayBackground];

    /// The preset's command-line name
    pub fn name(self) -> &'static str {
        match self {
            Self::LightBackground => "light-background",
            Self::GrayBackground => "gray-background",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light-background" | "light" => Ok(Self::LightBackground),
            "gray-background" | "grey-background" | "gray" | "grey" => Ok(Self::GrayBackground),
            other => Err(RegionError::InvalidParameters(format!(
                "unknown preset '{}': expected one of light-background, gray-background",
                other
            ))),
        }
    }
}

/// Options for [`segment`](crate::segment)
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Reference background color
    pub background: Rgb,
    /// Pixels closer than this to `background` are background
    pub threshold: f64,
    /// Regions with at most this many pixels are rejected
    pub min_region_size: u32,
    /// Regions with at least this many pixels are rejected
    pub max_region_size: u32,
    /// Paint color for accepted regions
    pub highlight: Rgb,
    /// Paint color for background and rejected regions
    pub fill: Rgb,
    /// Neighborhood used for region growth
    pub connectivity: ConnectivityType,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self::gray_background()
    }
}

impl SegmentOptions {
    /// Options for a light beige background
    ///
    /// Threshold 80, accepts regions of 11 to 149 pixels, paints them white.
    pub fn light_background() -> Self {
        Self {
            background: Rgb::new(0xD7, 0xD4, 0xC3),
            threshold: 80.0,
            min_region_size: 10,
            max_region_size: 150,
            highlight: Rgb::WHITE,
            fill: Rgb::BLACK,
            connectivity: ConnectivityType::EightWay,
        }
    }

    /// Options for a mid-gray background
    ///
    /// Threshold 100, accepts regions of 4 to 799 pixels, paints them red.
    pub fn gray_background() -> Self {
        Self {
            background: Rgb::new(0x8F, 0x93, 0x92),
            threshold: 100.0,
            min_region_size: 3,
            max_region_size: 800,
            highlight: Rgb::RED,
            fill: Rgb::BLACK,
            connectivity: ConnectivityType::EightWay,
        }
    }

    /// Options for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::LightBackground => Self::light_background(),
            Preset::GrayBackground => Self::gray_background(),
        }
    }

    /// Set the background reference color
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Set the background similarity threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the exclusive accept band `(min, max)` for region sizes
    pub fn with_size_band(mut self, min_region_size: u32, max_region_size: u32) -> Self {
        self.min_region_size = min_region_size;
        self.max_region_size = max_region_size;
        self
    }

    /// Set the lower size bound; regions this small or smaller are rejected
    pub fn with_min_region_size(mut self, min_region_size: u32) -> Self {
        self.min_region_size = min_region_size;
        self
    }

    /// Set the upper size bound; regions this large or larger are rejected
    pub fn with_max_region_size(mut self, max_region_size: u32) -> Self {
        self.max_region_size = max_region_size;
        self
    }

    /// Set the paint color for accepted regions
    pub fn with_highlight(mut self, highlight: Rgb) -> Self {
        self.highlight = highlight;
        self
    }

    /// Set the paint color for background and rejected regions
    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = fill;
        self
    }

    /// Set the connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Whether a region of `size` pixels survives the size filter
    ///
    /// Both bounds reject on equality.
    #[inline]
    pub fn accepts_size(&self, size: u32) -> bool {
        !(size >= self.max_region_size || size <= self.min_region_size)
    }

    /// Check the options before a segmentation call
    ///
    /// An empty accept band is allowed; it rejects every region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] for a negative or
    /// non-finite threshold.
    pub fn validate(&self) -> RegionResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
