//! PNG encoding for RGBA image data.
//!
//! Band images and rasterized plots are written as 8-bit RGBA PNGs
//! (color type 6) with unfiltered scanlines.

use std::io::Write;

use crate::error::{RenderError, RenderResult};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create an RGBA PNG image.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel, row-major)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage(width as u32, height as u32));
    }
    if pixels.len() != width * height * 4 {
        return Err(RenderError::DimensionMismatch {
            width,
            height,
            actual: pixels.len(),
        });
    }

    let mut png = Vec::with_capacity(pixels.len() / 2 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.extend_from_slice(&[
        8, // bit depth
        6, // color type (RGBA)
        0, // compression method
        0, // filter method
        0, // interlace method
    ]);
    write_chunk(&mut png, b"IHDR", &ihdr);

    let idat = deflate_scanlines(pixels, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Append a length-prefixed, CRC-suffixed chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with filter type 0 and zlib-compress the result.
fn deflate_scanlines(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    let stride = width * 4;
    let mut raw = Vec::with_capacity(height * (stride + 1));
    for row in pixels.chunks_exact(stride) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_signature_and_chunks() {
        let pixels = vec![255u8; 2 * 3 * 4];
        let png = create_png(&pixels, 2, 3).unwrap();

        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 2);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 3);
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_png_rejects_bad_dimensions() {
        assert!(create_png(&[0u8; 12], 2, 2).is_err());
        assert!(create_png(&[], 0, 0).is_err());
    }
}
