//! Generation options shared by every dasha system.

use serde::{Deserialize, Serialize};

use crate::error::DashaError;

use super::subperiod::RashiSubPeriodMethod;
use super::types::{DAYS_PER_YEAR, MAX_DASHA_DEPTH, MIN_DASHA_DEPTH};

/// Default materialized depth (Mahadasha, Antardasha, Pratyantardasha).
pub const DEFAULT_DASHA_DEPTH: u8 = 3;

/// Knobs for one tree generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaOptions {
    /// Levels to materialize, 1..=5.
    pub depth: u8,
    /// Cover at least this many years from birth instead of one cycle.
    pub horizon_years: Option<f64>,
    /// Days per dasha year.
    pub year_length_days: f64,
    /// Chara sub-period weighting.
    pub chara_sub_periods: RashiSubPeriodMethod,
    /// Return an error instead of falling back when both co-lords of a
    /// dual-lord sign sit in its exception sign.
    pub strict_dual_lordship: bool,
}

impl Default for DashaOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DASHA_DEPTH,
            horizon_years: None,
            year_length_days: DAYS_PER_YEAR,
            chara_sub_periods: RashiSubPeriodMethod::default(),
            strict_dual_lordship: false,
        }
    }
}

impl DashaOptions {
    /// Default options at `depth`.
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Replace the single-cycle horizon.
    pub fn with_horizon_years(mut self, years: f64) -> Self {
        self.horizon_years = Some(years);
        self
    }

    /// Set the Chara sub-period policy.
    pub fn with_chara_sub_periods(mut self, method: RashiSubPeriodMethod) -> Self {
        self.chara_sub_periods = method;
        self
    }

    /// Reject out-of-range values before any node is built.
    pub fn validate(&self) -> Result<(), DashaError> {
        if !(MIN_DASHA_DEPTH..=MAX_DASHA_DEPTH).contains(&self.depth) {
            return Err(DashaError::InvalidInput("depth must be within 1..=5"));
        }
        if !(self.year_length_days.is_finite() && self.year_length_days > 0.0) {
            return Err(DashaError::InvalidInput(
                "year length must be positive and finite",
            ));
        }
        if let Some(h) = self.horizon_years {
            if !(h.is_finite() && h > 0.0) {
                return Err(DashaError::InvalidInput(
                    "horizon must be positive and finite",
                ));
            }
        }
        Ok(())
    }

    /// Horizon override in days.
    pub fn horizon_days(&self) -> Option<f64> {
        self.horizon_years.map(|y| y * self.year_length_days)
    }

    /// Convert dasha years to days.
    pub fn days(&self, years: f64) -> f64 {
        years * self.year_length_days
    }
}
