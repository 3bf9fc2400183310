//! Birth balance calculation for dasha systems.
//!
//! - Nakshatra-based: computed from Moon's position within its nakshatra.
//! - Rashi-based: computed from lagna's position within its rashi.
//! - Pada-based: computed from Moon's position within its pada, mirrored by
//!   traversal direction.

use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};
use crate::rashi::RASHI_SPAN;

use super::rashi_util::Direction;

/// Compute nakshatra birth balance for a proportional dasha system.
///
/// Returns `(nakshatra_info, balance_years, elapsed_fraction)`:
/// - `balance_years`: remaining years in the starting lord's period
/// - `elapsed_fraction`: fraction of the nakshatra already traversed, [0, 1)
pub fn nakshatra_birth_balance(
    moon_sidereal_lon: f64,
    entry_period_years: f64,
) -> (NakshatraInfo, f64, f64) {
    let info = nakshatra_from_longitude(moon_sidereal_lon);
    let elapsed_fraction = info.elapsed_fraction();
    let balance = entry_period_years * (1.0 - elapsed_fraction);
    (info, balance, elapsed_fraction)
}

/// Compute rashi birth balance for a rashi-based dasha system.
///
/// Returns `(balance_years, elapsed_fraction)`. The lagna's position within
/// its rashi determines how much of the first Mahadasha has elapsed.
pub fn rashi_birth_balance(degree_in_rashi: f64, entry_period_years: f64) -> (f64, f64) {
    let elapsed_fraction = (degree_in_rashi / RASHI_SPAN).clamp(0.0, 1.0);
    let balance = entry_period_years * (1.0 - elapsed_fraction);
    (balance, elapsed_fraction)
}

/// Fraction of the first period still to run, from the Moon's place in its pada.
///
/// Forward (Savya) traversal counts the remaining part of the pada:
/// `(span - d) / span`. Reverse (Apasavya) traversal runs through the pada
/// against the zodiac, so the part already covered is what remains:
/// `d / span`. Both limits are mirrored at either pada edge.
pub fn pada_birth_balance(degree_in_pada: f64, pada_span: f64, direction: Direction) -> f64 {
    if pada_span.is_nan() || pada_span <= 0.0 || !degree_in_pada.is_finite() {
        return 0.0;
    }
    let d = degree_in_pada.clamp(0.0, pada_span);
    let fraction = match direction {
        Direction::Forward => (pada_span - d) / pada_span,
        Direction::Reverse => d / pada_span,
    };
    fraction.clamp(0.0, 1.0)
}
