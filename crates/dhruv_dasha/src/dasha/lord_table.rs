//! Cyclic lord tables for the proportional (nakshatra-seeded) systems.
//!
//! Each table is an ordered list of graha lords with their full-cycle
//! weights in years, plus a mapping from the 27 nakshatras to the position
//! in the list where the Mahadasha sequence starts.
//!
//! Provenance: BPHS chapters on Vimshottari, Ashtottari and Yogini dasha.

use crate::error::DashaError;
use crate::graha::Graha;
use crate::nakshatra::Nakshatra;

use super::types::DashaSystem;

/// Ordered, validated lord table.
#[derive(Debug, Clone, PartialEq)]
pub struct LordTable {
    system: DashaSystem,
    lords: Vec<(Graha, f64)>,
    cycle_years: f64,
    nakshatra_to_lord_idx: [u8; 27],
}

impl LordTable {
    /// Build a table, rejecting unusable weights or mappings.
    ///
    /// Weights must each be positive and finite, lords must be unique, and
    /// every nakshatra must map to a valid position.
    pub fn new(
        system: DashaSystem,
        lords: &[(Graha, f64)],
        nakshatra_to_lord_idx: [u8; 27],
    ) -> Result<Self, DashaError> {
        if lords.is_empty() {
            return Err(DashaError::InvalidWeightTable("lord table is empty"));
        }
        if lords.iter().any(|&(_, w)| !w.is_finite() || w <= 0.0) {
            return Err(DashaError::InvalidWeightTable(
                "every weight must be positive and finite",
            ));
        }
        for (i, &(g, _)) in lords.iter().enumerate() {
            if lords[..i].iter().any(|&(other, _)| other == g) {
                return Err(DashaError::InvalidWeightTable("duplicate lord in table"));
            }
        }
        let cycle_years: f64 = lords.iter().map(|&(_, w)| w).sum();
        if !cycle_years.is_finite() || cycle_years <= 0.0 {
            return Err(DashaError::InvalidWeightTable(
                "weights must sum to a positive finite value",
            ));
        }
        if nakshatra_to_lord_idx
            .iter()
            .any(|&idx| idx as usize >= lords.len())
        {
            return Err(DashaError::InvalidWeightTable(
                "nakshatra mapped past the end of the lord list",
            ));
        }
        Ok(Self {
            system,
            lords: lords.to_vec(),
            cycle_years,
            nakshatra_to_lord_idx,
        })
    }

    /// System this table belongs to.
    pub fn system(&self) -> DashaSystem {
        self.system
    }

    /// Lords with their weights, in dasha order.
    pub fn lords(&self) -> &[(Graha, f64)] {
        &self.lords
    }

    /// Number of lords in the cycle.
    pub fn len(&self) -> usize {
        self.lords.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.lords.is_empty()
    }

    /// Sum of all weights (120 for Vimshottari).
    pub fn cycle_years(&self) -> f64 {
        self.cycle_years
    }

    /// Position of `graha` in the cycle.
    pub fn position_of(&self, graha: Graha) -> Option<usize> {
        self.lords.iter().position(|&(g, _)| g == graha)
    }

    /// Weight of `graha` in years.
    pub fn weight_of(&self, graha: Graha) -> Option<f64> {
        self.lords.iter().find(|&&(g, _)| g == graha).map(|&(_, w)| w)
    }

    /// Position where the Mahadasha sequence starts for a Moon in `nakshatra`.
    pub fn start_index(&self, nakshatra: Nakshatra) -> usize {
        self.nakshatra_to_lord_idx[nakshatra.index() as usize] as usize
    }

    /// The `k`-th entry after position `start`, wrapping around the cycle.
    pub fn entry(&self, start: usize, k: usize) -> (Graha, f64) {
        self.lords[(start + k) % self.lords.len()]
    }

    /// Full cycle beginning at `graha` itself, or `None` if `graha` is not
    /// one of this table's lords.
    pub fn cycle_from(&self, graha: Graha) -> Option<impl Iterator<Item = (Graha, f64)> + '_> {
        let start = self.position_of(graha)?;
        Some((0..self.lords.len()).map(move |k| self.entry(start, k)))
    }
}

// ---------------------------------------------------------------------------
// Vimshottari Dasha (120 years, 9 grahas)
// ---------------------------------------------------------------------------

const VIMSHOTTARI_LORDS: [(Graha, f64); 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Shukra, 20.0),
    (Graha::Surya, 6.0),
    (Graha::Chandra, 10.0),
    (Graha::Mangal, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Guru, 16.0),
    (Graha::Shani, 19.0),
    (Graha::Buddh, 17.0),
];

/// Every 9th nakshatra shares a lord: Ashwini, Magha and Mula start with Ketu.
const VIMSHOTTARI_NAK_MAP: [u8; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Ashwini..Ashlesha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Magha..Jyeshtha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Mula..Revati
];

/// Vimshottari lord table.
pub fn vimshottari_table() -> Result<LordTable, DashaError> {
    LordTable::new(
        DashaSystem::Vimshottari,
        &VIMSHOTTARI_LORDS,
        VIMSHOTTARI_NAK_MAP,
    )
}

// ---------------------------------------------------------------------------
// Ashtottari Dasha (108 years, 8 grahas, no Ketu)
// Starting nakshatra: Ardra (index 5), groups of 3/4 nakshatras per lord.
// ---------------------------------------------------------------------------

const ASHTOTTARI_LORDS: [(Graha, f64); 8] = [
    (Graha::Surya, 6.0),
    (Graha::Chandra, 15.0),
    (Graha::Mangal, 8.0),
    (Graha::Buddh, 17.0),
    (Graha::Shani, 10.0),
    (Graha::Guru, 19.0),
    (Graha::Rahu, 12.0),
    (Graha::Shukra, 21.0),
];

const ASHTOTTARI_NAK_MAP: [u8; 27] = [
    6, 6, 7, 7, 7, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5, 6,
];

/// Ashtottari lord table.
pub fn ashtottari_table() -> Result<LordTable, DashaError> {
    LordTable::new(
        DashaSystem::Ashtottari,
        &ASHTOTTARI_LORDS,
        ASHTOTTARI_NAK_MAP,
    )
}

// ---------------------------------------------------------------------------
// Yogini Dasha (36 years, 8 yoginis)
// ---------------------------------------------------------------------------

/// Yogini names, in the same order as the lord list.
pub const YOGINI_NAMES: [&str; 8] = [
    "Mangala", "Pingala", "Dhanya", "Bhramari", "Bhadrika", "Ulka", "Siddha", "Sankata",
];

/// Graha lord of each yogini with its years.
const YOGINI_LORDS: [(Graha, f64); 8] = [
    (Graha::Chandra, 1.0),
    (Graha::Surya, 2.0),
    (Graha::Guru, 3.0),
    (Graha::Mangal, 4.0),
    (Graha::Buddh, 5.0),
    (Graha::Shani, 6.0),
    (Graha::Shukra, 7.0),
    (Graha::Rahu, 8.0),
];

/// Nakshatra → yogini: `(nakshatra_1_indexed + 3) % 8`, where 0 means the 8th.
const fn yogini_nak_map() -> [u8; 27] {
    let mut map = [0u8; 27];
    let mut i = 0;
    while i < 27 {
        let remainder = ((i + 1 + 3) % 8) as u8;
        map[i] = if remainder == 0 { 7 } else { remainder - 1 };
        i += 1;
    }
    map
}

/// Yogini lord table.
pub fn yogini_table() -> Result<LordTable, DashaError> {
    LordTable::new(DashaSystem::Yogini, &YOGINI_LORDS, yogini_nak_map())
}

/// Name of the yogini ruled by `graha`, if any.
pub fn yogini_name(graha: Graha) -> Option<&'static str> {
    YOGINI_LORDS
        .iter()
        .position(|&(g, _)| g == graha)
        .map(|i| YOGINI_NAMES[i])
}

/// Lord table for a proportional system; `None` for the sign-based systems.
pub fn lord_table_for(system: DashaSystem) -> Option<Result<LordTable, DashaError>> {
    match system {
        DashaSystem::Vimshottari => Some(vimshottari_table()),
        DashaSystem::Ashtottari => Some(ashtottari_table()),
        DashaSystem::Yogini => Some(yogini_table()),
        DashaSystem::Chara | DashaSystem::KaalChakra => None,
    }
}
