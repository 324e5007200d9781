//! Interactive point sampling over gridded spectral data
//!
//! A user clicks locations on a band image of a hyperspectral scene; each
//! click becomes a sample point whose full spectrum is drawn as one curve
//! of an overlay plot. This crate provides:
//!
//! - **Bounded point store**: at most `max_points` points, stable ids
//! - **Nearest-neighbor sampling**: per-axis, clamped to the dataset edges
//! - **Synchronous redraw**: every store mutation regenerates the overlay
//! - **Export**: CSV of the sampled spectra and per-band summaries
//!
//! # Architecture
//!
//! ```text
//! PointerEvent (click / drag / delete)
//!      │
//!      ▼
//! PointStore::click / move_point / remove
//!      │
//!      ├─► Ignored: nothing else happens
//!      │
//!      └─► Mutation: RenderCoordinator::mark_pending
//!               │
//!               ▼
//!          Sampler::sample_point for every active point
//!               │
//!               ▼
//!          Overlay (curves colored by point id)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use point_sampler::{Session, SpectralCube};
//!
//! let mut session = Session::new(cube)?;
//! session.click(-119.9, 34.5);
//! session.click(-120.1, 34.4);
//!
//! for curve in &session.overlay().curves {
//!     println!("point {} has {} bands", curve.id, curve.series.len());
//! }
//! session.export_csv("spectra.csv")?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod render;
pub mod sampler;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{CapacityPolicy, SessionConfig, DEFAULT_MAX_POINTS};
pub use error::{Result, SamplerError};
pub use export::{export_points_csv, export_summary_csv, write_points_csv, write_summary_csv};
pub use grid::{SpectralCube, SpectralGrid};
pub use render::{Curve, Overlay, RenderCoordinator, RenderState};
pub use sampler::{CellLocation, Sampler};
pub use session::{PointerEvent, Session};
pub use stats::SeriesSummary;
pub use store::{PointStore, StoreChange};
pub use types::{DerivedSeries, PointId, SamplePoint};

// Re-export shared types used in the public API
pub use renderer::PlotConfig;
pub use sampling_common::{Axis, BoundingBox, Color, GradientConfig, Palette};
