//! PNG image format support
//!
//! Decoding expands palettes and low bit depths and strips 16-bit samples,
//! so every PNG arrives as 8-bit gray, gray+alpha, RGB or RGBA. All of them
//! are stored as 32-bit pixels: gray is replicated into R, G and B, and
//! images with an alpha channel get spp = 4.

use crate::{IoError, IoResult};
use colorseg_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let (channels, spp) = match output_info.color_type {
        ColorType::Grayscale => (1, 3),
        ColorType::GrayscaleAlpha => (2, 4),
        ColorType::Rgb => (3, 3),
        ColorType::Rgba => (4, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output color type: {:?}",
                other
            )));
        }
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let s = &row[x * channels..(x + 1) * channels];
            let pixel = match channels {
                1 => color::compose_rgb(s[0], s[0], s[0]),
                2 => color::compose_rgba(s[0], s[0], s[0], s[1]),
                3 => color::compose_rgb(s[0], s[1], s[2]),
                _ => color::compose_rgba(s[0], s[1], s[2], s[3]),
            };
            pixels.push(pixel);
        }
    }

    let pix = Pix::from_data(width, height, PixelDepth::Bit32, spp, pixels)?;
    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_informat(ImageFormat::Png);
    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8-bit images are written as grayscale, 32-bit images as RGB or RGBA
/// depending on spp.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let color_type = match (pix.depth(), pix.spp()) {
        (PixelDepth::Bit8, _) => ColorType::Grayscale,
        (PixelDepth::Bit32, 4) => ColorType::Rgba,
        (PixelDepth::Bit32, _) => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(pix.data().len() * 4);
    for &pixel in pix.data() {
        match color_type {
            ColorType::Grayscale => data.push((pixel & 0xff) as u8),
            ColorType::Rgba => {
                let (r, g, b, a) = color::extract_rgba(pixel);
                data.extend_from_slice(&[r, g, b, a]);
            }
            _ => {
                let (r, g, b) = color::extract_rgb(pixel);
                data.extend_from_slice(&[r, g, b]);
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
