//! Serde configuration surface for the dasha engine.
//!
//! Every field has a default, so an empty document is a valid configuration.
//! Unknown keys are rejected to catch typos early.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dasha::options::{DEFAULT_DASHA_DEPTH, DashaOptions};
use crate::dasha::subperiod::RashiSubPeriodMethod;
use crate::dasha::types::{ALL_DASHA_SYSTEMS, DAYS_PER_YEAR, DashaSystem};
use crate::error::DashaError;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashaConfig {
    /// Systems generated when the caller does not name one.
    #[serde(default = "default_systems")]
    pub systems: Vec<DashaSystem>,

    /// Materialized depth, 1..=5.
    #[serde(default = "default_depth")]
    pub depth: u8,

    /// Cover this many years from birth instead of one cycle.
    #[serde(default)]
    pub horizon_years: Option<f64>,

    /// Days per dasha year.
    #[serde(default = "default_year_length_days")]
    pub year_length_days: f64,

    /// Chara sub-period weighting.
    #[serde(default)]
    pub chara_sub_periods: RashiSubPeriodMethod,

    /// Fail instead of falling back on an ambiguous dual lordship.
    #[serde(default)]
    pub strict_dual_lordship: bool,

    /// JSON file with an alternative Kaal Chakra path table.
    #[serde(default)]
    pub kaal_chakra_table: Option<PathBuf>,
}

fn default_systems() -> Vec<DashaSystem> {
    ALL_DASHA_SYSTEMS.to_vec()
}
fn default_depth() -> u8 {
    DEFAULT_DASHA_DEPTH
}
fn default_year_length_days() -> f64 {
    DAYS_PER_YEAR
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            systems: default_systems(),
            depth: default_depth(),
            horizon_years: None,
            year_length_days: default_year_length_days(),
            chara_sub_periods: RashiSubPeriodMethod::default(),
            strict_dual_lordship: false,
            kaal_chakra_table: None,
        }
    }
}

impl DashaConfig {
    /// Generation options derived from this configuration.
    pub fn options(&self) -> DashaOptions {
        DashaOptions {
            depth: self.depth,
            horizon_years: self.horizon_years,
            year_length_days: self.year_length_days,
            chara_sub_periods: self.chara_sub_periods,
            strict_dual_lordship: self.strict_dual_lordship,
        }
    }

    /// Check ranges and that at least one system is selected.
    pub fn validate(&self) -> Result<(), DashaError> {
        if self.systems.is_empty() {
            return Err(DashaError::InvalidInput("no dasha system selected"));
        }
        self.options().validate()
    }
}
