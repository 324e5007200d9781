//! Core types for point sampling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a sample point within one session.
///
/// Identifiers are handed out in creation order and never reused, so they
/// double as the creation order of the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u32);

impl PointId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A clicked location in the dataset's native coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Whether `(x, y)` lies within `tolerance` of this point on both axes.
    pub fn matches(&self, x: f64, y: f64, tolerance: f64) -> bool {
        (self.x - x).abs() <= tolerance && (self.y - y).abs() <= tolerance
    }
}

/// A spectrum: one measurement per value-axis coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    /// Value-axis coordinates (wavelength in nm).
    pub axis: Vec<f64>,
    /// Measurements; NaN where the dataset is masked or filled.
    pub values: Vec<f32>,
}

impl DerivedSeries {
    pub fn new(axis: Vec<f64>, values: Vec<f32>) -> Self {
        debug_assert_eq!(axis.len(), values.len());
        Self { axis, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (axis, value) pairs in band order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.axis.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of bands holding a finite measurement.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Whether two series are identical, NaN comparing equal to NaN.
    pub fn same_as(&self, other: &DerivedSeries) -> bool {
        self.axis == other.axis
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| (a.is_nan() && b.is_nan()) || a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_matches_tolerance() {
        let p = SamplePoint::new(PointId(0), 10.0, 20.0);
        assert!(p.matches(10.0, 20.0, 0.0));
        assert!(p.matches(10.4, 19.6, 0.5));
        assert!(!p.matches(10.6, 20.0, 0.5));
    }

    #[test]
    fn test_series_same_as_handles_nan() {
        let a = DerivedSeries::new(vec![400.0, 500.0], vec![0.1, f32::NAN]);
        let b = a.clone();
        assert!(a.same_as(&b));
        assert_ne!(a, b); // NaN != NaN under PartialEq
        assert_eq!(a.valid_count(), 1);
    }

    #[test]
    fn test_point_id_serializes_transparently() {
        assert_eq!(serde_json::to_string(&PointId(7)).unwrap(), "7");
    }
}
