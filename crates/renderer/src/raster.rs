//! Rasterization of overlay plots with resvg.

use std::sync::Arc;

use crate::error::{RenderError, RenderResult};
use crate::plot::SpectrumPlot;
use crate::png::create_png;

/// Rasterize an SVG document into a pixmap of its own declared size.
///
/// Text is only drawn when `load_system_fonts` is set and fonts are found;
/// otherwise labels are skipped and lines still render.
pub fn rasterize_svg(svg: &str, load_system_fonts: bool) -> RenderResult<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    if load_system_fonts {
        Arc::make_mut(&mut opt.fontdb).load_system_fonts();
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::EmptyImage(width, height))?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Straight (non-premultiplied) RGBA bytes of a pixmap.
pub fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

/// Render an overlay plot straight to PNG bytes.
pub fn render_plot_png(plot: &SpectrumPlot, load_system_fonts: bool) -> RenderResult<Vec<u8>> {
    let svg = plot.to_svg();
    let pixmap = rasterize_svg(&svg, load_system_fonts)?;
    let rgba = pixmap_to_rgba(&pixmap);

    tracing::debug!(
        width = pixmap.width(),
        height = pixmap.height(),
        curves = plot.series().len(),
        "rasterized spectrum plot"
    );

    create_png(&rgba, pixmap.width() as usize, pixmap.height() as usize)
}
