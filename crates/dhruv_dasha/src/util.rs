//! Shared utility functions for dasha calculations.

/// Longitudes closer than this to a cell boundary snap onto the boundary.
///
/// Keeps floating-point noise in upstream chart math from flipping a
/// sign, nakshatra or pada assignment.
pub const BOUNDARY_EPSILON_DEG: f64 = 1e-6;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Locate `lon` (degrees, [0, 360)) in a uniform grid of `cells` cells of
/// `span` degrees each.
///
/// Returns `(cell_index, offset_within_cell)`. Values within
/// [`BOUNDARY_EPSILON_DEG`] of a boundary belong to the cell starting at that
/// boundary, with an offset of exactly zero. The index wraps at 360.
pub fn snap_cell(lon: f64, span: f64, cells: u32) -> (u32, f64) {
    let q = lon / span;
    let nearest = q.round();
    let boundary = ((q - nearest) * span).abs() <= BOUNDARY_EPSILON_DEG;
    let idx = if boundary { nearest } else { q.floor() };
    let offset = if boundary {
        0.0
    } else {
        (lon - idx * span).clamp(0.0, span)
    };
    ((idx as i64).rem_euclid(cells as i64) as u32, offset)
}

/// Check that a longitude is finite and inside [0, 360).
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (0.0..360.0).contains(&lon)
}
