//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Decoded images are always 32-bit RGB; grayscale JPEGs
//! are replicated into the three channels. JPEG has no alpha, so writing
//! an RGBA image drops the alpha channel.

use crate::{IoError, IoResult};
use colorseg_core::{ImageFormat, Pix, PixelDepth, color};
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Default JPEG quality (1-100)
pub const DEFAULT_QUALITY: u8 = 75;

/// Read a JPEG image from a reader.
///
/// Supports 8-bit and 16-bit grayscale and 24-bit RGB. CMYK is rejected.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npixels = width as usize * height as usize;

    let pixels: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => data.iter().map(|&v| color::compose_rgb(v, v, v)).collect(),
        // Samples are big-endian; keep the high byte
        PixelFormat::L16 => data
            .chunks_exact(2)
            .map(|s| color::compose_rgb(s[0], s[0], s[0]))
            .collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .map(|s| color::compose_rgb(s[0], s[1], s[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    if pixels.len() != npixels {
        return Err(IoError::InvalidData(format!(
            "JPEG data holds {} pixels, expected {}",
            pixels.len(),
            npixels
        )));
    }

    let pix = Pix::from_data(width, height, PixelDepth::Bit32, 3, pixels)?;
    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_informat(ImageFormat::Jpeg);
    Ok(pix_mut.into())
}

/// Write a JPEG image.
///
/// 8-bit images are written as grayscale (Luma), 32-bit images as RGB.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width()).map_err(|_| {
        IoError::EncodeError(format!("JPEG width {} exceeds 65535", pix.width()))
    })?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} exceeds 65535", pix.height()))
    })?;

    let (color_type, image_data) = match pix.depth() {
        PixelDepth::Bit8 => (
            jpeg_encoder::ColorType::Luma,
            pix.data().iter().map(|&p| (p & 0xff) as u8).collect::<Vec<u8>>(),
        ),
        PixelDepth::Bit32 => {
            let mut rgb = Vec::with_capacity(pix.data().len() * 3);
            for &p in pix.data() {
                let (r, g, b) = color::extract_rgb(p);
                rgb.extend_from_slice(&[r, g, b]);
            }
            (jpeg_encoder::ColorType::Rgb, rgb)
        }
    };

    let quality = quality.clamp(1, 100);
    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality);
    encoder
        .encode(&image_data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_dimensions() {
        let pix = Pix::new(16, 8, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for y in 0..8 {
            for x in 0..16 {
                pm.set_rgb(x, y, 200, 30, 30).unwrap();
            }
        }
        let pix: Pix = pm.into();

        let mut buf = Vec::new();
        write_jpeg(&pix, &mut buf, 90).unwrap();
        assert_eq!(&buf[..3], &[0xFF, 0xD8, 0xFF]);

        let back = read_jpeg(Cursor::new(buf)).unwrap();
        assert_eq!((back.width(), back.height()), (16, 8));
        assert_eq!(back.informat(), ImageFormat::Jpeg);

        // Lossy, but a flat color survives closely
        let (r, g, b) = back.get_rgb(8, 4).unwrap();
        assert!(r.abs_diff(200) <= 8 && g.abs_diff(30) <= 8 && b.abs_diff(30) <= 8);
    }

    #[test]
    fn test_gray_write() {
        let gray = Pix::from_data(8, 8, PixelDepth::Bit8, 1, vec![128; 64]).unwrap();
        let mut buf = Vec::new();
        write_jpeg(&gray, &mut buf, DEFAULT_QUALITY).unwrap();

        let back = read_jpeg(Cursor::new(buf)).unwrap();
        let (r, g, b) = back.get_rgb(3, 3).unwrap();
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r.abs_diff(128) <= 2);
    }

    #[test]
    fn test_truncated_fails() {
        assert!(read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xE0])).is_err());
    }
}
