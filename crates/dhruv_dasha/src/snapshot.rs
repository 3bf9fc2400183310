//! Natal chart snapshot consumed by every dasha system.
//!
//! A snapshot is built once from already-resolved sidereal positions and is
//! never mutated afterwards. The graha map is a fixed array indexed by
//! [`Graha::index`], so every graha always has a position.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::DashaError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::rashi::{RASHI_SPAN, Rashi, rashi_from_longitude};
use crate::time::{datetime_from_jd, jd_from_datetime};
use crate::util::is_valid_longitude;

/// Sign placement of a body: rashi plus degrees into it.
///
/// Only built through validating constructors, so the degree is always
/// finite and inside [0, 30).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetaryPosition {
    rashi: Rashi,
    degree_in_rashi: f64,
}

fn check_degree(what: &'static str, degree_in_rashi: f64) -> Result<(), DashaError> {
    if degree_in_rashi.is_finite() && (0.0..RASHI_SPAN).contains(&degree_in_rashi) {
        Ok(())
    } else {
        Err(DashaError::InvalidLongitude {
            what,
            value: degree_in_rashi,
        })
    }
}

impl PlanetaryPosition {
    /// Build from an explicit rashi and degree.
    pub fn new(rashi: Rashi, degree_in_rashi: f64) -> Result<Self, DashaError> {
        check_degree("degree_in_rashi", degree_in_rashi)?;
        Ok(Self {
            rashi,
            degree_in_rashi,
        })
    }

    /// Build from a sidereal longitude in [0, 360).
    pub fn from_longitude(what: &'static str, sidereal_lon_deg: f64) -> Result<Self, DashaError> {
        if !is_valid_longitude(sidereal_lon_deg) {
            return Err(DashaError::InvalidLongitude {
                what,
                value: sidereal_lon_deg,
            });
        }
        let (rashi, degree_in_rashi) = rashi_from_longitude(sidereal_lon_deg);
        Ok(Self {
            rashi,
            degree_in_rashi,
        })
    }

    /// Occupied rashi.
    pub fn rashi(&self) -> Rashi {
        self.rashi
    }

    /// Degrees into the rashi, [0, 30).
    pub fn degree_in_rashi(&self) -> f64 {
        self.degree_in_rashi
    }

    /// Sidereal longitude in degrees.
    pub fn longitude(&self) -> f64 {
        f64::from(self.rashi.index()) * RASHI_SPAN + self.degree_in_rashi
    }
}

const GRAHA_LABELS: [&str; 9] = [
    "surya", "chandra", "mangal", "buddh", "guru", "shukra", "shani", "rahu", "ketu",
];

/// Immutable natal inputs for dasha generation.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalSnapshot {
    birth_jd: f64,
    utc_offset: FixedOffset,
    ascendant: PlanetaryPosition,
    grahas: [PlanetaryPosition; 9],
}

impl NatalSnapshot {
    /// Assemble a snapshot from resolved positions.
    ///
    /// `grahas` is indexed by [`Graha::index`]. Every position is checked
    /// again; the first bad one is reported by name.
    pub fn new(
        birth: DateTime<FixedOffset>,
        ascendant: PlanetaryPosition,
        grahas: [PlanetaryPosition; 9],
    ) -> Result<Self, DashaError> {
        check_degree("ascendant", ascendant.degree_in_rashi)?;
        for (label, pos) in GRAHA_LABELS.iter().zip(&grahas) {
            check_degree(label, pos.degree_in_rashi)?;
        }
        let birth_jd = jd_from_datetime(&birth);
        if !birth_jd.is_finite() {
            return Err(DashaError::InvalidInput("birth instant is not representable"));
        }
        Ok(Self {
            birth_jd,
            utc_offset: *birth.offset(),
            ascendant,
            grahas,
        })
    }

    /// Assemble a snapshot from sidereal longitudes.
    ///
    /// Every longitude must be finite and in [0, 360).
    pub fn from_longitudes(
        birth: DateTime<FixedOffset>,
        ascendant_lon: f64,
        graha_lons: [f64; 9],
    ) -> Result<Self, DashaError> {
        let ascendant = PlanetaryPosition::from_longitude("ascendant", ascendant_lon)?;
        let mut grahas = [ascendant; 9];
        for (i, slot) in grahas.iter_mut().enumerate() {
            *slot = PlanetaryPosition::from_longitude(GRAHA_LABELS[i], graha_lons[i])?;
        }
        Self::new(birth, ascendant, grahas)
    }

    /// Birth instant as JD UTC.
    pub fn birth_jd(&self) -> f64 {
        self.birth_jd
    }

    /// The fixed UTC offset the birth instant was given in.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Birth instant in its original offset.
    pub fn birth_datetime(&self) -> Option<DateTime<FixedOffset>> {
        datetime_from_jd(self.birth_jd, self.utc_offset)
    }

    /// Ascendant (lagna) position.
    pub fn ascendant(&self) -> PlanetaryPosition {
        self.ascendant
    }

    /// Ascendant rashi.
    pub fn ascendant_sign(&self) -> Rashi {
        self.ascendant.rashi()
    }

    /// Position of the Moon.
    pub fn moon(&self) -> PlanetaryPosition {
        self.position(Graha::Chandra)
    }

    /// Position of any graha.
    pub fn position(&self, graha: Graha) -> PlanetaryPosition {
        self.grahas[graha.index() as usize]
    }

    /// All graha positions, indexed by [`Graha::index`].
    pub fn positions(&self) -> &[PlanetaryPosition; 9] {
        &self.grahas
    }

    /// Number of other grahas sharing `graha`'s rashi.
    pub fn co_occupants(&self, graha: Graha) -> usize {
        let rashi = self.position(graha).rashi();
        ALL_GRAHAS
            .iter()
            .filter(|&&g| g != graha && self.position(g).rashi() == rashi)
            .count()
    }
}
