//! Overlay plots of realistic spectra.

use renderer::{render_plot_png, LineSeries, PlotConfig, SpectrumPlot};
use sampling_common::Color;
use test_utils::{create_reflectance_cube, emit_wavelengths};

fn emit_plot(pixels: usize) -> SpectrumPlot {
    let wl = emit_wavelengths(120);
    let cube = create_reflectance_cube(pixels, 1, &wl);

    (0..pixels).fold(SpectrumPlot::new(PlotConfig::default()), |plot, col| {
        let ys = cube[col * wl.len()..(col + 1) * wl.len()].to_vec();
        plot.with_series(LineSeries {
            label: format!("Point {}", col),
            color: Color::rgb((col * 80) as u8, 0, 255 - (col * 80) as u8),
            xs: wl.clone(),
            ys,
        })
    })
}

#[test]
fn test_water_vapour_gaps_split_curves() {
    let plot = emit_plot(3);
    let svg = plot.to_svg();

    // Two absorption windows cut each spectrum into three runs.
    assert_eq!(svg.matches("<polyline").count(), 9);
    assert!(svg.contains("Point 2"));
    assert!(svg.contains("Wavelength (nm)"));
}

#[test]
fn test_extent_ignores_nan() {
    let ((x0, x1), (y0, y1)) = emit_plot(2).extent();
    assert_eq!(x0, 381.0);
    assert!((x1 - 2493.0).abs() < 1e-6);
    assert!(y0 > 0.0 && y1 < 1.0);
}

#[test]
fn test_fixed_y_range() {
    let config = PlotConfig {
        y_range: Some((0.0, 1.0)),
        ..PlotConfig::default()
    };
    let plot = SpectrumPlot::new(config);
    assert_eq!(plot.extent().1, (0.0, 1.0));
}

#[test]
fn test_rasterized_overlay_size() {
    let config = PlotConfig {
        width: 320,
        height: 160,
        ..PlotConfig::default()
    };
    let plot = emit_plot(2)
        .series()
        .iter()
        .cloned()
        .fold(SpectrumPlot::new(config), SpectrumPlot::with_series);

    let png = render_plot_png(&plot, false).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    // IHDR width and height, big-endian
    assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 320);
    assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 160);
}
