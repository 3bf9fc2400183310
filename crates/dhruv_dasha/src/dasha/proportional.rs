//! Proportional-subdivision engine shared by Vimshottari, Ashtottari and Yogini.
//!
//! Mahadashas walk the lord table from the Moon's nakshatra lord, the first
//! one shortened by the elapsed part of the nakshatra. Every period is then
//! split by walking the same table from its own lord, each child getting
//! `weight / cycle_years` of the parent.

use chrono::FixedOffset;
use tracing::debug;

use crate::error::DashaError;
use crate::snapshot::NatalSnapshot;

use super::balance::nakshatra_birth_balance;
use super::lord_table::{LordTable, ashtottari_table, vimshottari_table, yogini_table};
use super::options::DashaOptions;
use super::subperiod::{Subdivision, top_level_periods};
use super::types::{DashaEntity, DashaTree};

/// Generate a proportional tree from an explicit seed.
///
/// `start_index` is the table position of the first Mahadasha lord and
/// `elapsed_fraction` (in [0, 1)) the part of its period already run at
/// `birth_jd`.
pub fn proportional_tree_from(
    birth_jd: f64,
    utc_offset: FixedOffset,
    table: &LordTable,
    start_index: usize,
    elapsed_fraction: f64,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    options.validate()?;
    if !(0.0..1.0).contains(&elapsed_fraction) {
        return Err(DashaError::InvalidInput(
            "elapsed fraction must be within [0, 1)",
        ));
    }
    if start_index >= table.len() {
        return Err(DashaError::InvalidInput("start index outside lord table"));
    }

    let entries = (0usize..).map(|k| {
        let (graha, years) = table.entry(start_index, k);
        let years = if k == 0 {
            years * (1.0 - elapsed_fraction)
        } else {
            years
        };
        (DashaEntity::Graha(graha), options.days(years))
    });
    let top_level = top_level_periods(birth_jd, entries, table.len(), options.horizon_days())?;

    debug!(
        system = table.system().id(),
        first_lord = table.entry(start_index, 0).0.name(),
        elapsed_fraction,
        mahadashas = top_level.len(),
        "proportional top level built"
    );

    Ok(DashaTree::assemble(
        table.system(),
        birth_jd,
        utc_offset,
        top_level,
        Subdivision::Proportional(table.clone()),
        options.depth,
    ))
}

/// Generate a proportional tree seeded by the Moon's nakshatra.
pub fn proportional_tree(
    snapshot: &NatalSnapshot,
    table: &LordTable,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    let (info, _balance, elapsed_fraction) =
        nakshatra_birth_balance(snapshot.moon().longitude(), 1.0);
    let start_index = table.start_index(info.nakshatra);
    proportional_tree_from(
        snapshot.birth_jd(),
        snapshot.utc_offset(),
        table,
        start_index,
        elapsed_fraction,
        options,
    )
}

/// Vimshottari (120 years).
pub fn vimshottari_tree(
    snapshot: &NatalSnapshot,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    proportional_tree(snapshot, &vimshottari_table()?, options)
}

/// Ashtottari (108 years).
pub fn ashtottari_tree(
    snapshot: &NatalSnapshot,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    proportional_tree(snapshot, &ashtottari_table()?, options)
}

/// Yogini (36 years).
pub fn yogini_tree(
    snapshot: &NatalSnapshot,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    proportional_tree(snapshot, &yogini_table()?, options)
}
