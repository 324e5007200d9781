//! Nearest-neighbor spectrum lookup.

use serde::Serialize;

use crate::grid::{mask_fill, SpectralGrid};
use crate::types::{DerivedSeries, SamplePoint};

/// Where a query coordinate landed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellLocation {
    pub col: usize,
    pub row: usize,
    /// Coordinates of the matched cell center.
    pub x: f64,
    pub y: f64,
    /// False when the query fell outside the cell-center extent and was
    /// resolved to an edge cell.
    pub inside: bool,
}

/// Resolves coordinates to spectra by per-axis nearest-neighbor matching.
///
/// Sampling is a pure function of (coordinates, dataset): nothing is
/// cached and out-of-extent queries resolve to the nearest edge cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler;

impl Sampler {
    pub fn new() -> Self {
        Self
    }

    /// The cell a coordinate pair resolves to.
    pub fn locate<G: SpectralGrid + ?Sized>(&self, grid: &G, x: f64, y: f64) -> CellLocation {
        let (col, row) = grid.nearest_cell(x, y);
        CellLocation {
            col,
            row,
            x: grid.x_axis().get(col).unwrap_or(f64::NAN),
            y: grid.y_axis().get(row).unwrap_or(f64::NAN),
            inside: grid.bounds().contains_point(x, y),
        }
    }

    /// Full spectrum at the cell nearest to `(x, y)`.
    ///
    /// The series always has one value per band; fill values and short
    /// reads come back as NaN.
    pub fn sample<G: SpectralGrid + ?Sized>(&self, grid: &G, x: f64, y: f64) -> DerivedSeries {
        let (col, row) = grid.nearest_cell(x, y);
        let wavelengths = grid.wavelengths();
        let fill = grid.fill_value();

        let mut values: Vec<f32> = grid
            .spectrum_at(col, row)
            .into_iter()
            .map(|v| mask_fill(v, fill))
            .collect();

        if values.len() != wavelengths.len() {
            tracing::warn!(
                col,
                row,
                got = values.len(),
                expected = wavelengths.len(),
                "spectrum length does not match value axis"
            );
            values.resize(wavelengths.len(), f32::NAN);
        }

        DerivedSeries::new(wavelengths.to_vec(), values)
    }

    /// Spectrum under a sample point.
    pub fn sample_point<G: SpectralGrid + ?Sized>(
        &self,
        grid: &G,
        point: &SamplePoint,
    ) -> DerivedSeries {
        self.sample(grid, point.x, point.y)
    }
}
