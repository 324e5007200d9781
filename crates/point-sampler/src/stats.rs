//! Per-band summary statistics across the sampled spectra.

use serde::Serialize;

use crate::types::DerivedSeries;

/// Mean and median of every band over a set of spectra, NaN ignored.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub axis: Vec<f64>,
    pub mean: Vec<f32>,
    pub median: Vec<f32>,
    /// Finite samples contributing to each band.
    pub count: Vec<usize>,
}

impl SeriesSummary {
    /// Summarize spectra sharing one value axis.
    ///
    /// Returns `None` for an empty input. Bands without any finite sample
    /// get NaN mean and median. Series of differing length only contribute
    /// the bands they have.
    pub fn from_series<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DerivedSeries>,
    {
        let series: Vec<&DerivedSeries> = series.into_iter().collect();
        let axis = series.first()?.axis.clone();
        let bands = axis.len();

        let mut mean = Vec::with_capacity(bands);
        let mut median = Vec::with_capacity(bands);
        let mut count = Vec::with_capacity(bands);
        let mut column = Vec::with_capacity(series.len());

        for band in 0..bands {
            column.clear();
            column.extend(
                series
                    .iter()
                    .filter_map(|s| s.values.get(band).copied())
                    .filter(|v| v.is_finite()),
            );

            count.push(column.len());
            if column.is_empty() {
                mean.push(f32::NAN);
                median.push(f32::NAN);
                continue;
            }

            let sum: f64 = column.iter().map(|&v| v as f64).sum();
            mean.push((sum / column.len() as f64) as f32);

            column.sort_by(|a, b| a.total_cmp(b));
            let mid = column.len() / 2;
            let med = if column.len() % 2 == 0 {
                (column[mid - 1] + column[mid]) / 2.0
            } else {
                column[mid]
            };
            median.push(med);
        }

        Some(Self {
            axis,
            mean,
            median,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_ignores_nan() {
        let a = DerivedSeries::new(vec![400.0, 500.0, 600.0], vec![1.0, f32::NAN, 3.0]);
        let b = DerivedSeries::new(vec![400.0, 500.0, 600.0], vec![3.0, f32::NAN, 4.0]);
        let c = DerivedSeries::new(vec![400.0, 500.0, 600.0], vec![8.0, f32::NAN, 5.0]);

        let summary = SeriesSummary::from_series([&a, &b, &c]).unwrap();
        assert_eq!(summary.mean[0], 4.0);
        assert_eq!(summary.median[0], 3.0);
        assert!(summary.mean[1].is_nan());
        assert_eq!(summary.count, vec![3, 0, 3]);
        assert_eq!(summary.median[2], 4.0);
    }

    #[test]
    fn test_even_count_median() {
        let a = DerivedSeries::new(vec![400.0], vec![1.0]);
        let b = DerivedSeries::new(vec![400.0], vec![2.0]);
        let summary = SeriesSummary::from_series([&a, &b]).unwrap();
        assert_eq!(summary.median[0], 1.5);
    }

    #[test]
    fn test_empty_input() {
        assert!(SeriesSummary::from_series(std::iter::empty::<&DerivedSeries>()).is_none());
    }
}
