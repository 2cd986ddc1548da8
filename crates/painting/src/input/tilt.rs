//! Pen tilt to azimuth conversion

use std::f32::consts::{FRAC_PI_2, TAU};

/// Derive the pen azimuth (radians, `[0, 2π)`) from tilt angles in degrees.
///
/// Tilt X maps to `[-π/2, π/2]` and tilt Y to `[π/2, -π/2]`. Returns `None`
/// for a perpendicular pen (both tilts exactly zero), where azimuth is
/// undefined.
pub fn azimuth_from_tilt(tilt_x: f32, tilt_y: f32) -> Option<f32> {
    if tilt_x == 0.0 && tilt_y == 0.0 {
        return None;
    }
    if !tilt_x.is_finite() || !tilt_y.is_finite() {
        return None;
    }

    let rad_x = tilt_x.clamp(-90.0, 90.0) / 90.0 * FRAC_PI_2;
    let rad_y = -tilt_y.clamp(-90.0, 90.0) / 90.0 * FRAC_PI_2;

    let y = rad_x.cos() * rad_y.sin();
    let x = rad_x.sin() * rad_y.cos();

    let mut azimuth = -y.atan2(x);
    if azimuth < 0.0 {
        azimuth += TAU;
    }
    // Tiny negative angles round up to exactly 2π
    if azimuth >= TAU {
        azimuth = 0.0;
    }
    Some(azimuth)
}
