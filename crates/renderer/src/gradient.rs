//! Band image rendering through a continuous color ramp.
//!
//! This is the raster users click on: one wavelength band of a spectral
//! cube, stretched between its finite minimum and maximum.

use rayon::prelude::*;
use sampling_common::GradientConfig;

use crate::error::{RenderError, RenderResult};

/// Finite minimum and maximum of the data, ignoring NaN and infinities.
///
/// Returns `None` when no finite value exists.
pub fn data_range(data: &[f32]) -> Option<(f32, f32)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Render a single band as RGBA pixels.
///
/// Values are normalized to [0, 1] over `range` (or the band's own finite
/// range when `None`) and colored with a gradient defined on [0, 1].
/// NaN pixels take the gradient's no-data color.
///
/// # Arguments
/// - `data`: band values (row-major, `width * height`)
/// - `width`, `height`: image size
/// - `range`: optional explicit stretch `(min, max)`
/// - `gradient`: color ramp over normalized values
pub fn render_band(
    data: &[f32],
    width: usize,
    height: usize,
    range: Option<(f32, f32)>,
    gradient: &GradientConfig,
) -> RenderResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage(width as u32, height as u32));
    }
    if data.len() != width * height {
        return Err(RenderError::DimensionMismatch {
            width,
            height,
            actual: data.len(),
        });
    }

    let (min_val, max_val) = range.or_else(|| data_range(data)).unwrap_or((0.0, 1.0));
    let span = max_val - min_val;
    let span = if span.abs() < f32::EPSILON { 1.0 } else { span };

    tracing::debug!(width, height, min_val, max_val, "rendering band image");

    let mut pixels = vec![0u8; width * height * 4];
    pixels
        .par_chunks_mut(width * 4)
        .zip(data.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (px, &value) in out_row.chunks_exact_mut(4).zip(in_row) {
                let normalized = if value.is_nan() {
                    f64::NAN
                } else {
                    ((value - min_val) / span) as f64
                };
                let color = gradient.interpolate(normalized);
                px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        });

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_range_skips_nan() {
        assert_eq!(data_range(&[f32::NAN, 2.0, -1.0, 5.0]), Some((-1.0, 5.0)));
        assert_eq!(data_range(&[f32::NAN]), None);
        assert_eq!(data_range(&[]), None);
    }

    #[test]
    fn test_render_band_greys() {
        let gradient = GradientConfig::named_ramp("greys").unwrap();
        let data = [0.0, 10.0, f32::NAN, 5.0];
        let pixels = render_band(&data, 2, 2, None, &gradient).unwrap();

        assert_eq!(&pixels[0..4], &[0, 0, 0, 255]);
        assert_eq!(&pixels[4..8], &[255, 255, 255, 255]);
        assert_eq!(&pixels[8..12], &[0, 0, 0, 0]);
        assert_eq!(&pixels[12..16], &[128, 128, 128, 255]);
    }

    #[test]
    fn test_render_band_constant_data() {
        let gradient = GradientConfig::named_ramp("greys").unwrap();
        let pixels = render_band(&[3.0; 4], 2, 2, None, &gradient).unwrap();
        assert!(pixels.chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_render_band_dimension_check() {
        let gradient = GradientConfig::named_ramp("greys").unwrap();
        assert!(render_band(&[0.0; 3], 2, 2, None, &gradient).is_err());
    }
}
