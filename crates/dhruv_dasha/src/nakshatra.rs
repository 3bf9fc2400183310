//! Nakshatra (lunar mansion) and pada placement for the 27-fold scheme.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each, and every nakshatra into 4 padas of 3 deg 20'.
//! The 108 padas are the cells used to seed nakshatra-based dashas.

use serde::{Deserialize, Serialize};

use crate::util::{normalize_360, snap_cell};

/// Width of a nakshatra in degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Width of a pada (quarter nakshatra) in degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// Number of pada cells around the zodiac (27 x 4).
pub const PADA_COUNT: u32 = 108;

/// Lunar mansion. Ashwini starts at 0 deg sidereal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Display name with spaces, e.g. "Purva Phalguni".
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// Position from Ashwini, 0..=26.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Nakshatra for a 0-based index, wrapping modulo 27.
    pub const fn from_index(index: u8) -> Self {
        ALL_NAKSHATRAS_27[(index % 27) as usize]
    }

    /// Zodiac order, for iteration.
    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS_27
    }
}

/// Where a longitude falls on the nakshatra and pada grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// Pada (quarter) within the nakshatra, 0-based (0..=3).
    pub pada_index: u8,
    /// Degrees past the nakshatra start, [0, NAKSHATRA_SPAN_27).
    pub degrees_in_nakshatra: f64,
    /// Degrees past the pada start, [0, PADA_SPAN).
    pub degrees_in_pada: f64,
}

impl NakshatraInfo {
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fn elapsed_fraction(&self) -> f64 {
        (self.degrees_in_nakshatra / NAKSHATRA_SPAN_27).clamp(0.0, 1.0 - f64::EPSILON)
    }

    /// 1-based pada number as used in the classical texts.
    pub fn pada(&self) -> u8 {
        self.pada_index + 1
    }
}

/// Determine nakshatra and pada from sidereal ecliptic longitude.
///
/// Placement is done on the 108-pada grid so that a longitude sitting on a
/// pada boundary (within floating-point noise) always lands in the same cell,
/// whichever side of the boundary the noise pushed it.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let (cell, degrees_in_pada) = snap_cell(lon, PADA_SPAN, PADA_COUNT);
    let nak_idx = (cell / 4) as u8;
    let pada_index = (cell % 4) as u8;
    let degrees_in_nakshatra = pada_index as f64 * PADA_SPAN + degrees_in_pada;

    NakshatraInfo {
        nakshatra: Nakshatra::from_index(nak_idx),
        pada_index,
        degrees_in_nakshatra,
        degrees_in_pada,
    }
}
