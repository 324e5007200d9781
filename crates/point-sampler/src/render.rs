//! Regeneration of the spectrum overlay after store mutations.
//!
//! Rendering is synchronous: a mutation flips the coordinator to
//! [`RenderState::RenderPending`] and the session redraws before it returns
//! control to the event loop.

use renderer::{LineSeries, PlotConfig, SpectrumPlot};
use sampling_common::{Color, Palette};
use serde::Serialize;
use tracing::debug;

use crate::grid::SpectralGrid;
use crate::sampler::Sampler;
use crate::store::PointStore;
use crate::types::{DerivedSeries, PointId};

/// Whether a redraw is owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    RenderPending,
}

/// One point's spectrum as drawn in the overlay.
#[derive(Debug, Clone, Serialize)]
pub struct Curve {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub series: DerivedSeries,
}

/// All curves of one render, in point creation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overlay {
    /// Sequence number of the render that produced this overlay.
    pub generation: u64,
    pub curves: Vec<Curve>,
}

impl Overlay {
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn curve(&self, id: PointId) -> Option<&Curve> {
        self.curves.iter().find(|c| c.id == id)
    }

    /// Build a plot with one line per curve, labelled by point id.
    pub fn to_plot(&self, config: PlotConfig) -> SpectrumPlot {
        self.curves
            .iter()
            .fold(SpectrumPlot::new(config), |plot, curve| {
                plot.with_series(LineSeries {
                    label: format!("Point {}", curve.id),
                    color: curve.color,
                    xs: curve.series.axis.clone(),
                    ys: curve.series.values.clone(),
                })
            })
    }

    /// JSON for an external plotting front-end. NaN values become `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Tracks pending redraws and assigns identity-keyed curve colors.
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    palette: Palette,
    state: RenderState,
    generation: u64,
}

impl RenderCoordinator {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            state: RenderState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Number of overlays produced so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record that the store changed and a redraw is owed.
    pub fn mark_pending(&mut self) {
        self.state = RenderState::RenderPending;
    }

    /// Curve color for a point. Depends only on the identifier, so a curve
    /// keeps its color while other points are added, moved or removed.
    pub fn color_for(&self, id: PointId) -> Color {
        self.palette.color_for(id.get())
    }

    /// Resample every active point and build a fresh overlay.
    pub fn render<G: SpectralGrid + ?Sized>(
        &mut self,
        store: &PointStore,
        sampler: &Sampler,
        grid: &G,
    ) -> Overlay {
        let curves = store
            .list()
            .iter()
            .map(|point| Curve {
                id: point.id,
                x: point.x,
                y: point.y,
                color: self.color_for(point.id),
                series: sampler.sample_point(grid, point),
            })
            .collect::<Vec<_>>();

        self.generation += 1;
        self.state = RenderState::Idle;
        debug!(generation = self.generation, curves = curves.len(), "rendered overlay");

        Overlay {
            generation: self.generation,
            curves,
        }
    }

    /// Render only if a mutation is pending.
    pub fn render_if_pending<G: SpectralGrid + ?Sized>(
        &mut self,
        store: &PointStore,
        sampler: &Sampler,
        grid: &G,
    ) -> Option<Overlay> {
        match self.state {
            RenderState::RenderPending => Some(self.render(store, sampler, grid)),
            RenderState::Idle => None,
        }
    }
}

impl Default for RenderCoordinator {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}
