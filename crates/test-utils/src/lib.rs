//! Shared test utilities for the spectra-explorer workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic spectral cube generators
//! - Scene and wavelength fixtures
//! - Approximate and NaN-aware assertion macros
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert two floating point values are within `epsilon` of each other.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.3001_f32, 0.3_f32, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert two spectra are identical, treating NaN as equal to NaN.
///
/// ```ignore
/// use test_utils::assert_series_eq;
///
/// assert_series_eq!(vec![1.0, f32::NAN], vec![1.0, f32::NAN]);
/// ```
#[macro_export]
macro_rules! assert_series_eq {
    ($left:expr, $right:expr) => {{
        let left: &[f32] = &$left;
        let right: &[f32] = &$right;
        assert_eq!(left.len(), right.len(), "series lengths differ");
        for (band, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let same = (l.is_nan() && r.is_nan()) || l == r;
            if !same {
                panic!(
                    "assertion failed: series differ at band {}: `{:?}` != `{:?}`",
                    band, l, r
                );
            }
        }
    }};
}
