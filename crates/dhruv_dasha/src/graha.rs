//! Vedic planet (graha) enum and exaltation signs.
//!
//! The 9 grahas own the periods of every graha-based dasha system. Rahu and
//! Ketu (the lunar nodes) are included as full members of the enum so that a
//! chart's graha map is always total.

use serde::{Deserialize, Serialize};

use crate::rashi::Rashi;

/// Period owner for graha-based systems. Declaration order is the chart order
/// (Surya first, Ketu last) and drives `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// Grahas in declaration order, so `ALL_GRAHAS[g.index()] == g`.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Display name, also used in log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Slot in `ALL_GRAHAS` and in a snapshot's position array.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Exaltation (uccha) sign.
    ///
    /// Rahu is taken as exalted in Vrishabha and Ketu in Vrischika.
    pub const fn exaltation_rashi(self) -> Rashi {
        match self {
            Self::Surya => Rashi::Mesha,
            Self::Chandra => Rashi::Vrishabha,
            Self::Mangal => Rashi::Makara,
            Self::Buddh => Rashi::Kanya,
            Self::Guru => Rashi::Karka,
            Self::Shukra => Rashi::Meena,
            Self::Shani => Rashi::Tula,
            Self::Rahu => Rashi::Vrishabha,
            Self::Ketu => Rashi::Vrischika,
        }
    }
}
