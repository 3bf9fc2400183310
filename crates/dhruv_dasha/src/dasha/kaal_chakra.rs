//! Kaal Chakra dasha: nakshatra-path rashi system with mirrored traversal.
//!
//! The Moon's pada selects a starting rashi and a direction from the
//! [`NakshatraPathTable`]. Mahadashas then step through all 12 rashis in that
//! direction, each lasting its sign-class years (movable 7, fixed 8, dual 9).
//! The first one is cut down by the Moon's position in its pada, counted
//! from the near or far edge depending on the direction.
//!
//! Sub-periods run through the 12 rashis again, starting at the parent's own
//! rashi in the chart's direction, each weighted by its sign-class years.

use tracing::debug;

use crate::error::DashaError;
use crate::nakshatra::{Nakshatra, PADA_SPAN, nakshatra_from_longitude};
use crate::snapshot::NatalSnapshot;

use super::balance::pada_birth_balance;
use super::kaal_chakra_data::{NakshatraPathTable, PathCell, PathDirection};
use super::options::DashaOptions;
use super::rashi_util::{Direction, zodiac_sequence};
use super::subperiod::{Subdivision, top_level_periods};
use super::types::{DashaEntity, DashaSystem, DashaTree};

/// Where a chart enters the Kaal Chakra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSeed {
    /// Moon's nakshatra.
    pub nakshatra: Nakshatra,
    /// Moon's pada, 0-based.
    pub pada_index: u8,
    /// Degrees of the Moon into its pada.
    pub degree_in_pada: f64,
    /// Starting rashi and direction.
    pub cell: PathCell,
}

/// Look up the path cell for a Moon longitude.
pub fn path_seed(
    table: &NakshatraPathTable,
    moon_sidereal_lon: f64,
) -> Result<PathSeed, DashaError> {
    let info = nakshatra_from_longitude(moon_sidereal_lon);
    let cell = table.cell(info.nakshatra, info.pada_index).ok_or_else(|| {
        DashaError::InvalidPathTable(format!(
            "no cell for {} pada {}",
            info.nakshatra.name(),
            info.pada()
        ))
    })?;
    Ok(PathSeed {
        nakshatra: info.nakshatra,
        pada_index: info.pada_index,
        degree_in_pada: info.degrees_in_pada,
        cell,
    })
}

/// Fraction of the first Mahadasha still to run at birth.
///
/// Savya: `(pada_span - degree_in_pada) / pada_span`.
/// Apasavya: `degree_in_pada / pada_span`.
pub fn balance_of_first_period(
    degree_in_pada: f64,
    pada_span: f64,
    direction: PathDirection,
) -> f64 {
    pada_birth_balance(degree_in_pada, pada_span, Direction::from(direction))
}

/// Years of one full cycle from `cell`: the sum of the 12 traversed weights.
pub fn cycle_years(table: &NakshatraPathTable, cell: PathCell) -> f64 {
    zodiac_sequence(cell.start, Direction::from(cell.direction))
        .iter()
        .map(|&r| table.weights.weight(r))
        .sum()
}

/// Generate the Kaal Chakra tree with the built-in path table.
pub fn kaal_chakra_tree(
    snapshot: &NatalSnapshot,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    kaal_chakra_tree_with(snapshot, &NakshatraPathTable::builtin(), options)
}

/// Generate the Kaal Chakra tree with an explicit path table.
pub fn kaal_chakra_tree_with(
    snapshot: &NatalSnapshot,
    table: &NakshatraPathTable,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    options.validate()?;
    table.validate()?;

    let seed = path_seed(table, snapshot.moon().longitude())?;
    let dir = Direction::from(seed.cell.direction);
    let seq = zodiac_sequence(seed.cell.start, dir);
    let balance = balance_of_first_period(seed.degree_in_pada, PADA_SPAN, seed.cell.direction);
    let weights = table.weights.by_sign();

    debug!(
        table = table.version.as_str(),
        nakshatra = seed.nakshatra.name(),
        pada = seed.pada_index + 1,
        start = seed.cell.start.name(),
        direction = ?seed.cell.direction,
        balance,
        cycle_years = cycle_years(table, seed.cell),
        "kaal chakra path seeded"
    );

    let entries = (0usize..).map(|k| {
        let rashi = seq[k % 12];
        let full = weights[rashi.index() as usize];
        let years = if k == 0 { full * balance } else { full };
        (DashaEntity::Rashi(rashi), options.days(years))
    });
    let top_level = top_level_periods(snapshot.birth_jd(), entries, 12, options.horizon_days())?;

    Ok(DashaTree::assemble(
        DashaSystem::KaalChakra,
        snapshot.birth_jd(),
        snapshot.utc_offset(),
        top_level,
        Subdivision::KaalChakra {
            weights,
            direction: dir,
        },
        options.depth,
    ))
}
