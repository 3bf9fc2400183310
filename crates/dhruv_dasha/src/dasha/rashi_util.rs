//! Rashi sign-type, parity, and directional stepping for dasha calculations.
//!
//! Forward and reverse traversal share one stepper parameterized by
//! [`Direction`]; there is no separate reverse code path.

use serde::{Deserialize, Serialize};

use crate::rashi::Rashi;

/// Classification of rashis by quality (movable/fixed/dual).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignType {
    /// Chara (movable): Mesha, Karka, Tula, Makara.
    Chara,
    /// Sthira (fixed): Vrishabha, Simha, Vrischika, Kumbha.
    Sthira,
    /// Dvisvabhava (dual): Mithuna, Kanya, Dhanu, Meena.
    Dvisvabhava,
}

/// Get the sign type of a rashi.
pub const fn sign_type(rashi: Rashi) -> SignType {
    match rashi.index() % 3 {
        0 => SignType::Chara,
        1 => SignType::Sthira,
        _ => SignType::Dvisvabhava,
    }
}

/// Check if a rashi is odd-signed (1-indexed: 1,3,5,7,9,11 = Mesha..Kumbha).
/// Odd signs: Mesha(0), Mithuna(2), Simha(4), Tula(6), Dhanu(8), Kumbha(10).
pub const fn is_odd_sign(rashi: Rashi) -> bool {
    rashi.index() % 2 == 0
}

/// Traversal direction through the zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Zodiacal order (Mesha → Vrishabha → ...).
    Forward,
    /// Reverse zodiacal order (Mesha → Meena → ...).
    Reverse,
}

impl Direction {
    /// Signed unit step.
    pub const fn unit(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Rashi reached after `steps` unit steps from `from`.
pub const fn step(from: Rashi, direction: Direction, steps: u8) -> Rashi {
    from.offset(((steps % 12) as i8) * direction.unit())
}

/// The 12 rashis visited starting at `start` (inclusive), one step at a time.
pub fn zodiac_sequence(start: Rashi, direction: Direction) -> [Rashi; 12] {
    let mut seq = [start; 12];
    for (i, slot) in seq.iter_mut().enumerate() {
        *slot = step(start, direction, i as u8);
    }
    seq
}

/// Number of unit steps (0..=11) from `from` to `to` in `direction`.
pub const fn count_steps(from: Rashi, to: Rashi, direction: Direction) -> u8 {
    let f = from.index() as i16;
    let t = to.index() as i16;
    let diff = match direction {
        Direction::Forward => t - f,
        Direction::Reverse => f - t,
    };
    diff.rem_euclid(12) as u8
}
