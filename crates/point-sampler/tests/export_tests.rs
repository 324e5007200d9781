//! CSV and image export from a session.

use point_sampler::{Axis, GradientConfig, PlotConfig, SamplerError, Session, SpectralCube};
use test_utils::{create_test_cube, missing_dir_path, scratch_dir, wavelengths};

fn session() -> Session<SpectralCube> {
    let x = Axis::regular("x", 0.0, 1.0, 4).unwrap();
    let y = Axis::regular("y", 3.0, -1.0, 4).unwrap();
    let wl = wavelengths::FIVE_BAND.to_vec();
    let cube = SpectralCube::new(x, y, wl, create_test_cube(4, 4, 5)).unwrap();
    Session::new(cube).unwrap()
}

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_export_without_points_writes_header_only() {
    let dir = scratch_dir();
    let path = dir.path().join("empty.csv");

    let rows = session().export_csv(&path).unwrap();
    assert_eq!(rows, 0);

    let records = read_rows(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], vec!["id", "x", "y", "480", "560", "660", "860", "1650"]);
}

#[test]
fn test_export_one_row_per_point() {
    let dir = scratch_dir();
    let path = dir.path().join("points.csv");

    let mut session = session();
    session.click(1.0, 3.0);
    session.click(2.0, 0.0);
    assert_eq!(session.export_csv(&path).unwrap(), 2);

    let records = read_rows(&path);
    assert_eq!(records.len(), 3);
    assert_eq!(records[1], vec!["0", "1", "3", "100", "101", "102", "103", "104"]);
    assert_eq!(records[2][..4], ["1", "2", "0", "30200"]);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = scratch_dir();
    let path = missing_dir_path(&dir, "points.csv");

    let err = session().export_csv(&path).unwrap_err();
    assert!(matches!(err, SamplerError::Export { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn test_summary_export() {
    let dir = scratch_dir();
    let path = dir.path().join("summary.csv");

    let mut session = session();
    assert!(session.export_summary_csv(&path).is_err());

    session.click(0.0, 3.0);
    session.click(1.0, 3.0);
    session.export_summary_csv(&path).unwrap();

    let records = read_rows(&path);
    assert_eq!(records[0][0], "statistic");
    assert_eq!(records[1][..2], ["mean", "50"]);
    assert_eq!(records[2][..2], ["median", "50"]);
    assert_eq!(records[3][..2], ["count", "2"]);
}

#[test]
fn test_save_plot_svg() {
    let dir = scratch_dir();
    let path = dir.path().join("overlay.svg");

    let mut session = session();
    session.click(0.0, 0.0);
    session.click(3.0, 3.0);
    session.save_plot(&path, PlotConfig::default()).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polyline").count(), 2);
}

#[test]
fn test_band_png_far_wavelength_uses_edge_band() {
    let session = session();
    let gradient = GradientConfig::named_ramp("greys").unwrap();
    let png = session.band_png(10_000.0, &gradient).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}
