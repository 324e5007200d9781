//! An interactive sampling session over one dataset.
//!
//! The session owns the point store and the render coordinator. Every
//! pointer event that changes the store triggers a synchronous redraw, so
//! [`Session::overlay`] always reflects the current points once
//! [`Session::handle`] returns.

use std::path::Path;

use renderer::{create_png, data_range, render_band, render_plot_png, PlotConfig, SpectrumPlot};
use sampling_common::GradientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{Result, SamplerError};
use crate::export::{export_points_csv, export_summary_csv};
use crate::grid::SpectralGrid;
use crate::render::{Overlay, RenderCoordinator, RenderState};
use crate::sampler::{CellLocation, Sampler};
use crate::stats::SeriesSummary;
use crate::store::{PointStore, StoreChange};
use crate::types::{DerivedSeries, PointId, SamplePoint};

/// Input from the map widget, in dataset coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Click on the map: adds a point, or moves the marker under the cursor.
    Click { x: f64, y: f64 },
    /// A marker was dragged to a new location.
    Drag { id: PointId, x: f64, y: f64 },
    /// A marker was deleted.
    Delete { id: PointId },
    /// All markers were removed.
    Clear,
}

/// Point-sampling session: store, sampler and overlay for one dataset.
pub struct Session<G> {
    config: SessionConfig,
    grid: G,
    store: PointStore,
    sampler: Sampler,
    coordinator: RenderCoordinator,
    overlay: Overlay,
}

impl<G: SpectralGrid> Session<G> {
    /// Start a session with the default configuration.
    pub fn new(grid: G) -> Result<Self> {
        Self::with_config(grid, SessionConfig::default())
    }

    pub fn with_config(grid: G, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let coordinator = RenderCoordinator::new(config.palette()?);

        info!(
            width = grid.x_axis().len(),
            height = grid.y_axis().len(),
            bands = grid.wavelengths().len(),
            max_points = config.max_points,
            policy = %config.capacity_policy,
            "started sampling session"
        );

        Ok(Self {
            store: PointStore::from_config(&config),
            sampler: Sampler::new(),
            coordinator,
            overlay: Overlay::default(),
            config,
            grid,
        })
    }

    /// Apply a pointer event and redraw if the store changed.
    pub fn handle(&mut self, event: PointerEvent) -> StoreChange {
        let change = match event {
            PointerEvent::Click { x, y } => self.store.click(x, y),
            PointerEvent::Drag { id, x, y } => self.store.move_point(id, x, y),
            PointerEvent::Delete { id } => self.store.remove(id),
            PointerEvent::Clear => self.store.clear(),
        };

        if change.is_mutation() {
            self.coordinator.mark_pending();
            self.redraw();
        } else {
            debug!(?event, "event left the store unchanged");
        }
        change
    }

    /// Click at `(x, y)`. Returns the affected point, or `None` if ignored.
    pub fn click(&mut self, x: f64, y: f64) -> Option<PointId> {
        self.handle(PointerEvent::Click { x, y }).point_id()
    }

    pub fn drag(&mut self, id: PointId, x: f64, y: f64) -> StoreChange {
        self.handle(PointerEvent::Drag { id, x, y })
    }

    pub fn delete(&mut self, id: PointId) -> StoreChange {
        self.handle(PointerEvent::Delete { id })
    }

    pub fn clear(&mut self) -> StoreChange {
        self.handle(PointerEvent::Clear)
    }

    fn redraw(&mut self) {
        if let Some(overlay) =
            self.coordinator
                .render_if_pending(&self.store, &self.sampler, &self.grid)
        {
            self.overlay = overlay;
        }
    }

    /// The overlay of the most recent render.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn render_state(&self) -> RenderState {
        self.coordinator.state()
    }

    pub fn points(&self) -> &[SamplePoint] {
        self.store.list()
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The grid cell a coordinate would sample, without adding a point.
    pub fn locate(&self, x: f64, y: f64) -> CellLocation {
        self.sampler.locate(&self.grid, x, y)
    }

    /// Spectrum at a coordinate, without adding a point.
    pub fn sample(&self, x: f64, y: f64) -> DerivedSeries {
        self.sampler.sample(&self.grid, x, y)
    }

    /// Per-band mean and median over the active points.
    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::from_series(self.overlay.curves.iter().map(|c| &c.series))
    }

    /// Write `id,x,y,<wavelengths...>` with one row per active point.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<usize> {
        export_points_csv(path, self.grid.wavelengths(), &self.overlay.curves)
    }

    /// Write the per-band summary. Fails when there are no points.
    pub fn export_summary_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let summary = self
            .summary()
            .ok_or_else(|| SamplerError::export(path, "no sample points to summarize"))?;
        export_summary_csv(path, &summary)
    }

    /// The current overlay as a line plot.
    pub fn plot(&self, config: PlotConfig) -> SpectrumPlot {
        self.overlay.to_plot(config)
    }

    pub fn plot_svg(&self, config: PlotConfig) -> String {
        self.plot(config).to_svg()
    }

    /// Rasterize the overlay plot. Axis text needs `load_system_fonts`.
    pub fn plot_png(&self, config: PlotConfig, load_system_fonts: bool) -> Result<Vec<u8>> {
        Ok(render_plot_png(&self.plot(config), load_system_fonts)?)
    }

    /// Write the overlay plot as SVG, or PNG when the path ends in `.png`.
    pub fn save_plot(&self, path: impl AsRef<Path>, config: PlotConfig) -> Result<()> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("png"));

        let bytes = if is_png {
            self.plot_png(config, true)?
        } else {
            self.plot_svg(config).into_bytes()
        };
        std::fs::write(path, &bytes).map_err(|e| SamplerError::export(path, e))?;

        info!(path = %path.display(), curves = self.overlay.len(), "saved spectrum plot");
        Ok(())
    }

    /// Color the band nearest to `wavelength` and encode it as PNG.
    ///
    /// This is the clickable base image; NaN pixels are transparent.
    pub fn band_png(&self, wavelength: f64, gradient: &GradientConfig) -> Result<Vec<u8>> {
        let band = self
            .grid
            .nearest_band(wavelength)
            .ok_or_else(|| SamplerError::invalid_dataset("dataset has no bands"))?;
        let image = self.grid.band_image(band)?;
        let (width, height) = (self.grid.x_axis().len(), self.grid.y_axis().len());

        let range = data_range(&image);
        let pixels = render_band(&image, width, height, range, gradient)?;
        debug!(wavelength, band, width, height, ?range, "rendered band image");

        Ok(create_png(&pixels, width, height)?)
    }
}
