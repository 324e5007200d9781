//! Overlay line plots of spectra, emitted as SVG documents.
//!
//! Each [`LineSeries`] becomes one or more polylines: NaN samples (masked
//! water-vapour bands, fill values) break the curve into separate segments
//! instead of being drawn as zero.

use sampling_common::Color;
use serde::{Deserialize, Serialize};

/// Layout and styling of an overlay plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Space reserved around the data area for ticks and labels
    pub margin: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    /// Fixed y extent; derived from the data when absent
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    pub line_width: f32,
    pub background: Color,
}

fn default_x_label() -> String {
    "Wavelength (nm)".to_string()
}

fn default_y_label() -> String {
    "Reflectance".to_string()
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 300,
            margin: 50,
            title: None,
            x_label: default_x_label(),
            y_label: default_y_label(),
            y_range: None,
            line_width: 1.5,
            background: Color::rgb(255, 255, 255),
        }
    }
}

/// One curve of the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub color: Color,
    pub xs: Vec<f64>,
    pub ys: Vec<f32>,
}

impl LineSeries {
    /// Contiguous runs of finite samples, as (x, y) pairs.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (&x, &y) in self.xs.iter().zip(&self.ys) {
            if y.is_finite() && x.is_finite() {
                current.push((x, y as f64));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// An overlay of spectrum curves sharing one pair of axes.
#[derive(Debug, Clone)]
pub struct SpectrumPlot {
    config: PlotConfig,
    series: Vec<LineSeries>,
}

impl SpectrumPlot {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: LineSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    /// Data extent as ((x_min, x_max), (y_min, y_max)).
    ///
    /// Falls back to the unit square when there is nothing finite to plot.
    /// Zero-width extents, including a fixed `y_range`, are widened by 0.5
    /// on each side.
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);

        for (px, py) in self.series.iter().flat_map(|s| s.segments()).flatten() {
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }

        (widen(x), widen(self.config.y_range.unwrap_or(y)))
    }

    /// Render the overlay to an SVG document.
    pub fn to_svg(&self) -> String {
        let cfg = &self.config;
        let (w, h, m) = (cfg.width as f64, cfg.height as f64, cfg.margin as f64);
        let plot_w = (w - 2.0 * m).max(1.0);
        let plot_h = (h - 2.0 * m).max(1.0);
        let ((x0, x1), (y0, y1)) = self.extent();

        let sx = |x: f64| m + (x - x0) / (x1 - x0) * plot_w;
        let sy = |y: f64| m + plot_h - (y - y0) / (y1 - y0) * plot_h;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>\n",
            cfg.background.to_hex()
        ));
        svg.push_str(&format!(
            "<rect x=\"{m}\" y=\"{m}\" width=\"{plot_w}\" height=\"{plot_h}\" fill=\"none\" stroke=\"#444444\" stroke-width=\"1\"/>\n"
        ));

        for i in 0..=4 {
            let t = i as f64 / 4.0;
            let xv = x0 + t * (x1 - x0);
            let yv = y0 + t * (y1 - y0);
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\" fill=\"#444444\">{}</text>\n",
                sx(xv),
                m + plot_h + 14.0,
                format_tick(xv)
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\" fill=\"#444444\">{}</text>\n",
                m - 4.0,
                sy(yv) + 3.0,
                format_tick(yv)
            ));
        }

        let mid_y = m + plot_h / 2.0;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            m + plot_w / 2.0,
            h - 8.0,
            escape_xml(&cfg.x_label)
        ));
        svg.push_str(&format!(
            "<text x=\"12\" y=\"{mid_y:.1}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 12 {mid_y:.1})\">{}</text>\n",
            escape_xml(&cfg.y_label)
        ));
        if let Some(title) = &cfg.title {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" text-anchor=\"middle\">{}</text>\n",
                w / 2.0,
                m / 2.0,
                escape_xml(title)
            ));
        }

        for (index, series) in self.series.iter().enumerate() {
            let color = series.color.to_hex();
            for segment in series.segments() {
                let points: Vec<String> = segment
                    .iter()
                    .map(|&(x, y)| format!("{:.2},{:.2}", sx(x), sy(y)))
                    .collect();
                svg.push_str(&format!(
                    "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"{}\" points=\"{}\"/>\n",
                    cfg.line_width,
                    points.join(" ")
                ));
            }

            // legend entry
            let ly = m + 12.0 + index as f64 * 14.0;
            let lx = m + plot_w - 90.0;
            svg.push_str(&format!(
                "<line x1=\"{lx:.1}\" y1=\"{ly:.1}\" x2=\"{:.1}\" y2=\"{ly:.1}\" stroke=\"{color}\" stroke-width=\"2\"/>\n",
                lx + 16.0
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\">{}</text>\n",
                lx + 20.0,
                ly + 3.0,
                escape_xml(&series.label)
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Non-finite extents become the unit interval; empty ones get a width of 1.
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, ys: Vec<f32>) -> LineSeries {
        LineSeries {
            label: label.to_string(),
            color: Color::rgb(31, 119, 180),
            xs: (0..ys.len()).map(|i| 400.0 + i as f64 * 10.0).collect(),
            ys,
        }
    }

    #[test]
    fn test_nan_splits_segments() {
        let s = series("1", vec![0.1, 0.2, f32::NAN, f32::NAN, 0.3, 0.4]);
        let segments = s.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1][0], (440.0, 0.3f32 as f64));
    }

    #[test]
    fn test_all_nan_has_no_segments() {
        assert!(series("1", vec![f32::NAN; 3]).segments().is_empty());
    }

    #[test]
    fn test_empty_plot_renders_frame() {
        let plot = SpectrumPlot::new(PlotConfig::default());
        let svg = plot.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<polyline"));
        assert_eq!(plot.extent(), ((0.0, 1.0), (0.0, 1.0)));
    }

    #[test]
    fn test_overlay_contains_each_curve_color() {
        let mut b = series("2", vec![0.5, 0.6]);
        b.color = Color::rgb(255, 127, 14);
        let plot = SpectrumPlot::new(PlotConfig::default())
            .with_series(series("1", vec![0.1, 0.2]))
            .with_series(b);

        let svg = plot.to_svg();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("#1f77b4"));
        assert!(svg.contains("#ff7f0e"));
    }

    #[test]
    fn test_flat_y_range_is_widened() {
        let config = PlotConfig {
            y_range: Some((1.0, 1.0)),
            ..PlotConfig::default()
        };
        let plot = SpectrumPlot::new(config).with_series(series("1", vec![1.0, 1.0]));
        assert_eq!(plot.extent().1, (0.5, 1.5));

        let svg = plot.to_svg();
        assert!(!svg.contains("NaN"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let config = PlotConfig {
            title: Some("a < b & c".to_string()),
            ..PlotConfig::default()
        };
        let svg = SpectrumPlot::new(config).to_svg();
        assert!(svg.contains("a &lt; b &amp; c"));
    }
}
