//! Gridded spectral datasets.
//!
//! The sampler only needs nearest-cell resolution and a spectrum per cell,
//! so datasets are reached through the [`SpectralGrid`] trait. Readers of
//! real NetCDF/GeoTIFF products live outside this crate; [`SpectralCube`] is
//! the in-memory implementation used for small scenes and tests.

use std::rc::Rc;
use std::sync::Arc;

use sampling_common::{Axis, BoundingBox};

use crate::error::{Result, SamplerError};

/// A dataset indexed by two spatial axes and one value axis (wavelength).
pub trait SpectralGrid {
    /// Column coordinates (x / longitude / easting).
    fn x_axis(&self) -> &Axis;

    /// Row coordinates (y / latitude / northing).
    fn y_axis(&self) -> &Axis;

    /// Value-axis coordinates, one per band.
    fn wavelengths(&self) -> &[f64];

    /// Raw measurements of every band at a cell, before fill masking.
    ///
    /// Callers only pass indices obtained from [`SpectralGrid::nearest_cell`].
    fn spectrum_at(&self, col: usize, row: usize) -> Vec<f32>;

    /// Sentinel marking missing measurements, if the product uses one.
    fn fill_value(&self) -> Option<f32> {
        None
    }

    /// Nearest cell along each axis independently, clamped to the edges.
    fn nearest_cell(&self, x: f64, y: f64) -> (usize, usize) {
        (self.x_axis().nearest_index(x), self.y_axis().nearest_index(y))
    }

    /// Extent of the cell centers.
    fn bounds(&self) -> BoundingBox {
        let (min_x, max_x) = self.x_axis().extent();
        let (min_y, max_y) = self.y_axis().extent();
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Index of the band whose wavelength is closest to `wavelength`.
    ///
    /// Ties resolve to the first such band.
    fn nearest_band(&self, wavelength: f64) -> Option<usize> {
        self.wavelengths()
            .iter()
            .enumerate()
            .map(|(i, wl)| (i, (wl - wavelength).abs()))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ if d.is_nan() => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)
    }

    /// One band as a row-major image (`height` rows of `width` values),
    /// fill values replaced by NaN.
    fn band_image(&self, band: usize) -> Result<Vec<f32>> {
        let bands = self.wavelengths().len();
        if band >= bands {
            return Err(SamplerError::BandOutOfRange { band, bands });
        }

        let fill = self.fill_value();
        let (width, height) = (self.x_axis().len(), self.y_axis().len());
        let mut image = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let value = self.spectrum_at(col, row).get(band).copied();
                image.push(value.map_or(f32::NAN, |v| mask_fill(v, fill)));
            }
        }
        Ok(image)
    }
}

macro_rules! forward_spectral_grid {
    ($($wrapper:ty),*) => {
        $(
            impl<T: SpectralGrid + ?Sized> SpectralGrid for $wrapper {
                fn x_axis(&self) -> &Axis {
                    (**self).x_axis()
                }
                fn y_axis(&self) -> &Axis {
                    (**self).y_axis()
                }
                fn wavelengths(&self) -> &[f64] {
                    (**self).wavelengths()
                }
                fn spectrum_at(&self, col: usize, row: usize) -> Vec<f32> {
                    (**self).spectrum_at(col, row)
                }
                fn fill_value(&self) -> Option<f32> {
                    (**self).fill_value()
                }
                fn nearest_cell(&self, x: f64, y: f64) -> (usize, usize) {
                    (**self).nearest_cell(x, y)
                }
                fn band_image(&self, band: usize) -> Result<Vec<f32>> {
                    (**self).band_image(band)
                }
            }
        )*
    };
}

forward_spectral_grid!(&T, Box<T>, Rc<T>, Arc<T>);

/// An in-memory spectral cube laid out `[row][col][band]`.
#[derive(Debug, Clone)]
pub struct SpectralCube {
    x: Axis,
    y: Axis,
    wavelengths: Vec<f64>,
    data: Vec<f32>,
    fill_value: Option<f32>,
}

impl SpectralCube {
    /// Create a cube, checking that `data` holds `rows * cols * bands` values.
    pub fn new(x: Axis, y: Axis, wavelengths: Vec<f64>, data: Vec<f32>) -> Result<Self> {
        if wavelengths.is_empty() {
            return Err(SamplerError::invalid_dataset("cube has no bands"));
        }
        if wavelengths.iter().any(|wl| !wl.is_finite()) {
            return Err(SamplerError::invalid_dataset("wavelengths must be finite"));
        }

        let expected = x.len() * y.len() * wavelengths.len();
        if data.len() != expected {
            return Err(SamplerError::invalid_dataset(format!(
                "expected {} values ({} rows x {} cols x {} bands), got {}",
                expected,
                y.len(),
                x.len(),
                wavelengths.len(),
                data.len()
            )));
        }

        Ok(Self {
            x,
            y,
            wavelengths,
            data,
            fill_value: None,
        })
    }

    /// Declare the product's fill value; matching samples read as NaN.
    pub fn with_fill_value(mut self, fill_value: f32) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    /// Blank every band of the pixels flagged in `mask` (row-major, one
    /// flag per pixel), as done with cloud or quality masks.
    pub fn with_quality_mask(mut self, mask: &[bool]) -> Result<Self> {
        let pixels = self.width() * self.height();
        if mask.len() != pixels {
            return Err(SamplerError::invalid_dataset(format!(
                "quality mask has {} flags for {} pixels",
                mask.len(),
                pixels
            )));
        }

        let bands = self.bands();
        let mut masked = 0usize;
        for (spectrum, _) in self
            .data
            .chunks_exact_mut(bands)
            .zip(mask)
            .filter(|(_, flag)| **flag)
        {
            spectrum.fill(f32::NAN);
            masked += 1;
        }

        tracing::debug!(masked, pixels, "applied quality mask");
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.x.len()
    }

    pub fn height(&self) -> usize {
        self.y.len()
    }

    pub fn bands(&self) -> usize {
        self.wavelengths.len()
    }
}

impl SpectralGrid for SpectralCube {
    fn x_axis(&self) -> &Axis {
        &self.x
    }

    fn y_axis(&self) -> &Axis {
        &self.y
    }

    fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    fn spectrum_at(&self, col: usize, row: usize) -> Vec<f32> {
        let bands = self.bands();
        if col >= self.width() || row >= self.height() {
            return vec![f32::NAN; bands];
        }
        let start = (row * self.width() + col) * bands;
        self.data[start..start + bands].to_vec()
    }

    fn fill_value(&self) -> Option<f32> {
        self.fill_value
    }

    fn band_image(&self, band: usize) -> Result<Vec<f32>> {
        let bands = self.bands();
        if band >= bands {
            return Err(SamplerError::BandOutOfRange { band, bands });
        }

        Ok(self
            .data
            .iter()
            .skip(band)
            .step_by(bands)
            .map(|&v| mask_fill(v, self.fill_value))
            .collect())
    }
}

/// Replace a fill sentinel with NaN.
pub(crate) fn mask_fill(value: f32, fill: Option<f32>) -> f32 {
    match fill {
        Some(fill) if value == fill => f32::NAN,
        _ => value,
    }
}
