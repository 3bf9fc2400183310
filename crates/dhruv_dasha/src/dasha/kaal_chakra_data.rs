//! Kaal Chakra dasha data: the nakshatra-pada path table.
//!
//! Each of the 108 padas (27 nakshatras × 4) maps to a starting rashi and a
//! traversal direction, Savya (with the zodiac) or Apasavya (against it).
//! The direction is also fixed per nakshatra by a 14/13 partition; a table is
//! only accepted when both agree.
//!
//! Classical sources disagree on this table, so it is treated as versioned
//! data: [`NakshatraPathTable::builtin`] ships version 1, and an alternative
//! authority can be loaded from JSON with [`NakshatraPathTable::from_json`].
//!
//! Version 1 cell rule: a Savya pada starts at its navamsa rashi
//! `(4n + p) mod 12`; an Apasavya pada starts at the mirror of that rashi,
//! `11 - (4n + p) mod 12`. Savya nakshatras are those at even indices
//! (Ashwini, Krittika, ..., Revati).
//!
//! Provenance: BPHS chapter on Kaal Chakra dasha for the pada paths. The
//! sign-class years of version 1 (movable 7, fixed 8, dual 9) are this
//! crate's reading of the class spans and travel with the table as
//! [`SignClassWeights`], so a table from another authority carries its own.

use serde::{Deserialize, Serialize};

use crate::error::DashaError;
use crate::nakshatra::{Nakshatra, PADA_COUNT};
use crate::rashi::Rashi;

use super::rashi_util::{Direction, SignType, sign_type};

/// Version tag of the built-in table.
pub const BUILTIN_TABLE_VERSION: &str = "v1";

/// Number of Savya nakshatras in a valid partition.
pub const SAVYA_NAKSHATRA_COUNT: usize = 14;

/// Number of Apasavya nakshatras in a valid partition.
pub const APASAVYA_NAKSHATRA_COUNT: usize = 13;

/// Traversal direction of a Kaal Chakra path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathDirection {
    /// With the zodiac.
    Savya,
    /// Against the zodiac.
    Apasavya,
}

impl From<PathDirection> for Direction {
    fn from(path: PathDirection) -> Self {
        match path {
            PathDirection::Savya => Direction::Forward,
            PathDirection::Apasavya => Direction::Reverse,
        }
    }
}

/// One pada's path: where it starts and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathCell {
    /// First Mahadasha rashi.
    pub start: Rashi,
    /// Traversal direction.
    pub direction: PathDirection,
}

/// Mahadasha years by sign class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignClassWeights {
    /// Movable signs (Mesha, Karka, Tula, Makara).
    pub movable: f64,
    /// Fixed signs (Vrishabha, Simha, Vrischika, Kumbha).
    pub fixed: f64,
    /// Dual signs (Mithuna, Kanya, Dhanu, Meena).
    pub dual: f64,
}

impl Default for SignClassWeights {
    fn default() -> Self {
        Self {
            movable: 7.0,
            fixed: 8.0,
            dual: 9.0,
        }
    }
}

impl SignClassWeights {
    /// Years for one rashi.
    pub fn weight(&self, rashi: Rashi) -> f64 {
        match sign_type(rashi) {
            SignType::Chara => self.movable,
            SignType::Sthira => self.fixed,
            SignType::Dvisvabhava => self.dual,
        }
    }

    /// Years for all 12 rashis, indexed by [`Rashi::index`].
    pub fn by_sign(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        for r in Rashi::all() {
            out[r.index() as usize] = self.weight(*r);
        }
        out
    }
}

/// Versioned pada → path table with its nakshatra partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NakshatraPathTable {
    /// Provenance tag, part of every cache key.
    pub version: String,
    /// 0-based indices of the Savya nakshatras; the rest are Apasavya.
    pub savya_nakshatras: Vec<u8>,
    /// 108 cells in pada order (nakshatra-major).
    pub cells: Vec<PathCell>,
    /// Per-sign-class years.
    #[serde(default)]
    pub weights: SignClassWeights,
}

impl NakshatraPathTable {
    /// Built-in version 1 table.
    pub fn builtin() -> Self {
        let savya_nakshatras: Vec<u8> = (0..27u8).filter(|n| n % 2 == 0).collect();
        let mut cells = Vec::with_capacity(PADA_COUNT as usize);
        for n in 0..27u8 {
            let direction = if n % 2 == 0 {
                PathDirection::Savya
            } else {
                PathDirection::Apasavya
            };
            for p in 0..4u8 {
                let navamsa = ((4 * u16::from(n) + u16::from(p)) % 12) as u8;
                let start = match direction {
                    PathDirection::Savya => Rashi::from_index(navamsa),
                    PathDirection::Apasavya => Rashi::from_index(11 - navamsa),
                };
                cells.push(PathCell { start, direction });
            }
        }
        Self {
            version: BUILTIN_TABLE_VERSION.to_string(),
            savya_nakshatras,
            cells,
            weights: SignClassWeights::default(),
        }
    }

    /// Parse and validate a JSON table.
    pub fn from_json(json: &str) -> Result<Self, DashaError> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| DashaError::InvalidPathTable(format!("parse error: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Serialize as pretty JSON (the format [`Self::from_json`] reads).
    pub fn to_json(&self) -> Result<String, DashaError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashaError::InvalidPathTable(format!("serialize error: {e}")))
    }

    /// Direction assigned to `nakshatra` by the partition.
    pub fn partition_direction(&self, nakshatra: Nakshatra) -> PathDirection {
        if self.savya_nakshatras.contains(&nakshatra.index()) {
            PathDirection::Savya
        } else {
            PathDirection::Apasavya
        }
    }

    /// Path cell for a pada (`pada_index` 0..=3).
    ///
    /// Returns `None` only for a table that was never validated.
    pub fn cell(&self, nakshatra: Nakshatra, pada_index: u8) -> Option<PathCell> {
        let idx = nakshatra.index() as usize * 4 + (pada_index % 4) as usize;
        self.cells.get(idx).copied()
    }

    /// Check shape, partition and the agreement of both direction sources.
    pub fn validate(&self) -> Result<(), DashaError> {
        let fail = |msg: String| Err(DashaError::InvalidPathTable(msg));

        if self.version.trim().is_empty() {
            return fail("version tag is empty".into());
        }
        if self.cells.len() != PADA_COUNT as usize {
            return fail(format!(
                "expected {PADA_COUNT} cells, found {}",
                self.cells.len()
            ));
        }

        let mut seen = [false; 27];
        for &n in &self.savya_nakshatras {
            let Some(slot) = seen.get_mut(n as usize) else {
                return fail(format!("nakshatra index {n} out of range"));
            };
            if *slot {
                return fail(format!("nakshatra index {n} listed twice"));
            }
            *slot = true;
        }
        if self.savya_nakshatras.len() != SAVYA_NAKSHATRA_COUNT {
            return fail(format!(
                "partition must list {SAVYA_NAKSHATRA_COUNT} savya nakshatras \
                 ({APASAVYA_NAKSHATRA_COUNT} apasavya), found {}",
                self.savya_nakshatras.len()
            ));
        }

        for nakshatra in Nakshatra::all() {
            let expected = self.partition_direction(*nakshatra);
            for p in 0..4u8 {
                let idx = nakshatra.index() as usize * 4 + p as usize;
                let cell = self.cells[idx];
                if cell.direction != expected {
                    return fail(format!(
                        "{} pada {} is {:?} but the partition says {:?}",
                        nakshatra.name(),
                        p + 1,
                        cell.direction,
                        expected
                    ));
                }
            }
        }

        let w = &self.weights;
        if [w.movable, w.fixed, w.dual]
            .iter()
            .any(|&x| !(x.is_finite() && x > 0.0))
        {
            return fail("sign class weights must be positive and finite".into());
        }
        Ok(())
    }
}

impl Default for NakshatraPathTable {
    fn default() -> Self {
        Self::builtin()
    }
}
