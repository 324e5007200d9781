//! User-triggered CSV export of sampled spectra.
//!
//! The point table has the header `id,x,y,<wavelength...>` and one row per
//! active point. Missing measurements are written as empty fields.

use std::io;
use std::path::Path;

use tracing::info;

use crate::error::{Result, SamplerError};
use crate::render::Curve;
use crate::stats::SeriesSummary;

/// Column label for a value-axis coordinate (`381`, `385.5`, ...).
pub fn axis_label(value: f64) -> String {
    format!("{}", value)
}

fn value_field(value: f32) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Write the point table to any writer. Returns the number of data rows.
pub fn write_points_csv<W: io::Write>(
    writer: W,
    wavelengths: &[f64],
    curves: &[Curve],
) -> std::result::Result<usize, csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["id".to_string(), "x".to_string(), "y".to_string()];
    header.extend(wavelengths.iter().map(|&wl| axis_label(wl)));
    csv.write_record(&header)?;

    for curve in curves {
        let mut record = Vec::with_capacity(3 + wavelengths.len());
        record.push(curve.id.to_string());
        record.push(curve.x.to_string());
        record.push(curve.y.to_string());
        record.extend(
            (0..wavelengths.len())
                .map(|band| value_field(curve.series.values.get(band).copied().unwrap_or(f32::NAN))),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(curves.len())
}

/// Write the point table to a file.
///
/// The parent directory must already exist; a missing directory is
/// reported as [`SamplerError::Export`].
pub fn export_points_csv(
    path: impl AsRef<Path>,
    wavelengths: &[f64],
    curves: &[Curve],
) -> Result<usize> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| SamplerError::export(path, e))?;
    let rows = write_points_csv(file, wavelengths, curves).map_err(|e| SamplerError::export(path, e))?;

    info!(path = %path.display(), rows, bands = wavelengths.len(), "exported sample points");
    Ok(rows)
}

/// Write mean, median and count rows for each band.
pub fn write_summary_csv<W: io::Write>(
    writer: W,
    summary: &SeriesSummary,
) -> std::result::Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["statistic".to_string()];
    header.extend(summary.axis.iter().map(|&wl| axis_label(wl)));
    csv.write_record(&header)?;

    let mut row = |name: &str, fields: Vec<String>| {
        let mut record = Vec::with_capacity(fields.len() + 1);
        record.push(name.to_string());
        record.extend(fields);
        csv.write_record(&record)
    };

    row("mean", summary.mean.iter().map(|&v| value_field(v)).collect())?;
    row("median", summary.median.iter().map(|&v| value_field(v)).collect())?;
    row("count", summary.count.iter().map(|c| c.to_string()).collect())?;

    csv.flush()?;
    Ok(())
}

/// Write the per-band summary to a file.
pub fn export_summary_csv(path: impl AsRef<Path>, summary: &SeriesSummary) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| SamplerError::export(path, e))?;
    write_summary_csv(file, summary).map_err(|e| SamplerError::export(path, e))?;

    info!(path = %path.display(), bands = summary.axis.len(), "exported summary statistics");
    Ok(())
}
