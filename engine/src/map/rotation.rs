//! Rotation units.
//!
//! Editors and generators exchange rotation in degrees, restricted to the
//! six hex facings. Hexes store radians. Any degree value outside the six
//! is snapped to the nearest facing before conversion.

use std::f64::consts::PI;

/// The six valid facings, in degrees.
pub const ROTATION_STEPS_DEGREES: [u16; 6] = [0, 60, 120, 180, 240, 300];

/// Snap an arbitrary angle in degrees to the nearest hex facing.
///
/// Angles are normalized into `[0, 360)` first, so `-60` becomes `300` and
/// `330` wraps to `0`.
pub fn snap_degrees(degrees: f64) -> u16 {
    if !degrees.is_finite() {
        return 0;
    }
    let normalized = degrees.rem_euclid(360.0);
    let step = (normalized / 60.0).round() as usize % 6;
    ROTATION_STEPS_DEGREES[step]
}

/// Degrees (snapped to a facing) -> radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    snap_degrees(degrees) as f64 * PI / 180.0
}

/// Radians -> the nearest facing, in degrees.
pub fn radians_to_degrees(radians: f64) -> u16 {
    snap_degrees(radians * 180.0 / PI)
}
