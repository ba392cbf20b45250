//! colorseg-io - Image I/O for colorseg
//!
//! Reads and writes the raster formats the segmentation pipeline consumes:
//!
//! - **PNG** (feature `png-format`): lossless, keeps alpha
//! - **JPEG** (feature `jpeg`): lossy, no alpha
//!
//! Every decoded image is 32-bit: gray sources are replicated into RGB and
//! sources with an alpha channel come back with spp = 4. The source format
//! is recorded in [`Pix::informat`].

pub mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "png-format")]
pub mod png;

pub use colorseg_core::ImageFormat;
pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use colorseg_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its header.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats other than PNG and
/// JPEG, or for a format whose feature is disabled.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

#[allow(unused_variables)]
fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(reader),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::read_jpeg(reader),

        _ => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not supported",
            format
        ))),
    }
}

/// Write an image to a file in the given format.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for [`ImageFormat::Unknown`] or a
/// format whose feature is disabled.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

#[allow(unused_variables)]
fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::write_png(pix, writer),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::write_jpeg(pix, writer, crate::jpeg::DEFAULT_QUALITY),

        _ => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            format
        ))),
    }
}
