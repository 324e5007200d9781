//! Image rendering for spectral point sampling.
//!
//! Implements:
//! - Band images through a continuous color ramp (the clickable base map)
//! - Spectrum overlay plots as SVG documents
//! - Rasterization of overlay plots with resvg
//! - PNG encoding of RGBA buffers

pub mod error;
pub mod gradient;
pub mod plot;
pub mod png;
pub mod raster;

pub use error::{RenderError, RenderResult};
pub use gradient::{data_range, render_band};
pub use plot::{LineSeries, PlotConfig, SpectrumPlot};
pub use png::create_png;
pub use raster::{rasterize_svg, render_plot_png};
