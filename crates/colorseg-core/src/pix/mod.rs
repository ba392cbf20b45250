//! PIX - The image container
//!
//! `Pix` holds one 32-bit word per pixel, in row-major order.
//!
//! # Pixel layout
//!
//! - 32-bit images: `0xRRGGBBAA` (red in MSB). `spp` is 3 for RGB and 4
//!   for RGBA; RGB images keep alpha at 255.
//! - 8-bit images: the gray value in the low byte, `spp` is 1.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if `bits` is not 8 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::UnsupportedDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Default samples per pixel for a freshly created image.
    fn default_spp(self) -> u32 {
        match self {
            PixelDepth::Bit8 => 1,
            PixelDepth::Bit32 => 3,
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Samples per pixel: 1 (gray), 3 (RGB) or 4 (RGBA)
    spp: u32,
    informat: ImageFormat,
    /// One word per pixel, row-major
    data: Vec<u32>,
}

impl PixData {
    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn validate_spp(depth: PixelDepth, spp: u32) -> Result<()> {
    let ok = match depth {
        PixelDepth::Bit8 => spp == 1,
        PixelDepth::Bit32 => spp == 3 || spp == 4,
    };
    if ok { Ok(()) } else { Err(Error::InvalidSpp(spp)) }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use colorseg_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit32).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.spp(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// 8-bit images start all zero; 32-bit images start as opaque black RGB
    /// (spp = 3). Call [`PixMut::set_spp`] to enable the alpha channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let fill = match depth {
            PixelDepth::Bit8 => 0,
            PixelDepth::Bit32 => color::compose_rgb(0, 0, 0),
        };
        let data = vec![fill; width as usize * height as usize];
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                spp: depth.default_spp(),
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Create a PIX from existing row-major pixel words.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, `spp` does not fit the
    /// depth, or `data` does not hold exactly `width * height` words.
    pub fn from_data(
        width: u32,
        height: u32,
        depth: PixelDepth,
        spp: u32,
        data: Vec<u32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        validate_spp(depth, spp)?;

        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                spp,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Check whether the image carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.spp == 4
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Check whether two images have the same geometry and pixel words.
    pub fn equals(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
            && self.spp() == other.spp()
            && self.data() == other.data()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Check whether the image carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.spp == 4
    }

    /// Set the samples per pixel.
    ///
    /// Switching a 32-bit image from RGBA to RGB forces every alpha byte
    /// to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpp`] if `spp` does not fit the depth.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        validate_spp(self.inner.depth, spp)?;
        if self.inner.depth == PixelDepth::Bit32 && spp == 3 {
            for word in &mut self.inner.data {
                *word |= 0xff;
            }
        }
        self.inner.spp = spp;
        Ok(())
    }

    /// Set the input file format.
    #[inline]
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable raw access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(Pix::new(0, 10, PixelDepth::Bit32).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_new_defaults() {
        let pix = Pix::new(4, 3, PixelDepth::Bit32).unwrap();
        assert_eq!(pix.spp(), 3);
        assert!(!pix.has_alpha());
        assert_eq!(pix.data().len(), 12);
        assert!(pix.data().iter().all(|&p| p == 0x0000_00ff));

        let gray = Pix::new(4, 3, PixelDepth::Bit8).unwrap();
        assert_eq!(gray.spp(), 1);
    }

    #[test]
    fn test_from_data_validation() {
        assert!(Pix::from_data(2, 2, PixelDepth::Bit32, 4, vec![0; 4]).is_ok());
        assert!(matches!(
            Pix::from_data(2, 2, PixelDepth::Bit32, 4, vec![0; 3]),
            Err(Error::DataLengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            Pix::from_data(2, 2, PixelDepth::Bit8, 3, vec![0; 4]),
            Err(Error::InvalidSpp(3))
        ));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_is_a_copy() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let mut copy = pix.to_mut();
        copy.data_mut()[0] = 7;
        assert_eq!(pix.data()[0], 0xff);
        let copy: Pix = copy.into();
        assert!(!pix.equals(&copy));
    }

    #[test]
    fn test_set_spp_rgb_forces_opaque() {
        let pix = Pix::from_data(1, 2, PixelDepth::Bit32, 4, vec![0x11223300, 0]).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(3).unwrap();
        assert_eq!(pm.data(), &[0x112233ff, 0x000000ff]);
        assert!(pm.set_spp(1).is_err());
    }
}
