//! Common types and utilities shared across the spectra-explorer crates.

pub mod axis;
pub mod bbox;
pub mod error;
pub mod style;

pub use axis::{Axis, AxisOrder};
pub use bbox::BoundingBox;
pub use error::{CommonError, CommonResult};
pub use style::{Color, ColorStop, GradientConfig, Palette};
