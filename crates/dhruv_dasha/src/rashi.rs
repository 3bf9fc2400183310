//! Rashi (zodiac sign) enum and sign placement from sidereal longitude.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg. Signs are always handled as this
//! closed enum, never as free-form names.

use serde::{Deserialize, Serialize};

use crate::util::snap_cell;

/// Span of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// Sign of the sidereal zodiac. Mesha covers [0, 30) deg and each later
/// variant the next 30 deg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Display name, also used in log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Position in the zodiac, Mesha = 0.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Rashi `offset` signs away, wrapping in either direction.
    pub const fn offset(self, offset: i8) -> Self {
        let idx = (self.index() as i16 + offset as i16).rem_euclid(12);
        ALL_RASHIS[idx as usize]
    }

    /// Zodiac order, for iteration.
    pub const fn all() -> &'static [Rashi; 12] {
        &ALL_RASHIS
    }
}

/// Sign placement of a sidereal longitude.
///
/// Returns the rashi and the degrees within it, [0, 30). Longitudes within
/// the boundary tolerance of a sign cusp are placed at 0 deg of the later sign.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> (Rashi, f64) {
    let lon = crate::util::normalize_360(sidereal_lon_deg);
    let (idx, degrees_in_rashi) = snap_cell(lon, RASHI_SPAN, 12);
    (Rashi::from_index(idx as u8), degrees_in_rashi)
}
