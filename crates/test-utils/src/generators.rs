//! Test data generators for synthetic spectral cubes.
//!
//! Cubes are laid out the way orthorectified EMIT reflectance is:
//! `[row][col][band]`, row 0 being the northernmost line.

/// Creates a cube whose values encode their own position.
///
/// Each value is `row * 10_000 + col * 100 + band`, so a sampled spectrum
/// tells you exactly which cell was hit. Valid for `width` and `bands`
/// below 100.
///
/// # Example
///
/// ```
/// use test_utils::create_test_cube;
///
/// let cube = create_test_cube(3, 2, 4);
/// assert_eq!(cube.len(), 24);
/// assert_eq!(cube[0], 0.0);          // row 0, col 0, band 0
/// assert_eq!(cube[5], 101.0);        // row 0, col 1, band 1
/// assert_eq!(cube[12], 10_000.0);    // row 1, col 0, band 0
/// ```
pub fn create_test_cube(width: usize, height: usize, bands: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * bands);
    for row in 0..height {
        for col in 0..width {
            for band in 0..bands {
                data.push((row * 10_000 + col * 100 + band) as f32);
            }
        }
    }
    data
}

/// Expected spectrum of [`create_test_cube`] at a cell.
pub fn test_cube_spectrum(row: usize, col: usize, bands: usize) -> Vec<f32> {
    (0..bands)
        .map(|band| (row * 10_000 + col * 100 + band) as f32)
        .collect()
}

/// Evenly spaced wavelength centers in nanometers, EMIT-like by default
/// range (381 nm to 2493 nm).
pub fn emit_wavelengths(bands: usize) -> Vec<f64> {
    linspace(381.0, 2493.0, bands)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// True for wavelengths inside the two deep water-vapour absorption windows
/// that EMIT flags as bad bands.
pub fn is_water_vapour_band(wavelength_nm: f64) -> bool {
    (1340.0..=1450.0).contains(&wavelength_nm) || (1800.0..=1960.0).contains(&wavelength_nm)
}

/// Creates a vegetation-like reflectance cube.
///
/// Every pixel has a red edge near 700 nm whose plateau brightens from
/// west to east; water-vapour bands are NaN.
pub fn create_reflectance_cube(width: usize, height: usize, wavelengths: &[f64]) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * wavelengths.len());
    for row in 0..height {
        for col in 0..width {
            let plateau = 0.3 + 0.3 * col as f64 / width.max(1) as f64;
            let shade = 1.0 - 0.2 * row as f64 / height.max(1) as f64;
            for &wl in wavelengths {
                if is_water_vapour_band(wl) {
                    data.push(f32::NAN);
                    continue;
                }
                let edge = 1.0 / (1.0 + (-(wl - 700.0) / 15.0).exp());
                let value = (0.05 + (plateau - 0.05) * edge) * shade;
                data.push(value as f32);
            }
        }
    }
    data
}
