//! Common test fixtures for spectral sampling tests.

use std::path::PathBuf;

/// Fill value used by EMIT and ECOSTRESS products for missing pixels.
pub const FILL_VALUE: f32 = -9999.0;

/// Scene extents as (min_x, min_y, max_x, max_y).
pub mod scenes {
    /// Jack and Laura Dangermond Preserve, geographic degrees.
    pub const DANGERMOND: (f64, f64, f64, f64) = (-120.50, 34.40, -120.30, 34.60);

    /// A small UTM zone 11N tile in meters (NEON AOP style).
    pub const NEON_UTM_TILE: (f64, f64, f64, f64) = (257_000.0, 4_111_000.0, 258_000.0, 4_112_000.0);
}

/// Small wavelength sets in nanometers.
pub mod wavelengths {
    /// Five broad bands: blue, green, red, NIR, SWIR.
    pub const FIVE_BAND: [f64; 5] = [480.0, 560.0, 660.0, 860.0, 1650.0];

    /// PACE OCI style visible bands.
    pub const OCI_VISIBLE: [f64; 6] = [412.0, 443.0, 490.0, 510.0, 555.0, 670.0];
}

/// A scratch directory removed when the guard is dropped.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create scratch directory")
}

/// A path inside `dir` that is guaranteed not to exist, for export-failure tests.
pub fn missing_dir_path(dir: &tempfile::TempDir, file_name: &str) -> PathBuf {
    dir.path().join("does-not-exist").join(file_name)
}
