//! Rashi lordship, including the two co-ruled signs.
//!
//! Standard Vedic lordship (BPHS) gives every sign one graha lord. Rashi-based
//! dashas additionally treat Vrischika as co-ruled by Mangal and Ketu, and
//! Kumbha as co-ruled by Shani and Rahu. Which co-lord's position counts is
//! settled by the tie-break cascade in `dasha::chara`.

use crate::graha::Graha;
use crate::rashi::Rashi;

/// Lordship of a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignLord {
    /// One lord.
    Single(Graha),
    /// Two co-lords, listed in priority order, and the exception sign: a
    /// co-lord sitting there is discarded in favour of the other.
    Dual(Graha, Graha, Rashi),
}

impl SignLord {
    /// The primary lord (the only lord for single lordship).
    pub const fn primary(self) -> Graha {
        match self {
            Self::Single(g) | Self::Dual(g, _, _) => g,
        }
    }

    /// True for co-ruled signs.
    pub const fn is_dual(self) -> bool {
        matches!(self, Self::Dual(..))
    }
}

/// Lordship of a rashi for rashi-based dashas.
///
/// - Mesha → Mangal, Vrishabha/Tula → Shukra, Mithuna/Kanya → Buddh
/// - Karka → Chandra, Simha → Surya, Dhanu/Meena → Guru, Makara → Shani
/// - Vrischika → Mangal + Ketu, Kumbha → Shani + Rahu
pub const fn sign_lord(rashi: Rashi) -> SignLord {
    match rashi {
        Rashi::Mesha => SignLord::Single(Graha::Mangal),
        Rashi::Vrishabha => SignLord::Single(Graha::Shukra),
        Rashi::Mithuna => SignLord::Single(Graha::Buddh),
        Rashi::Karka => SignLord::Single(Graha::Chandra),
        Rashi::Simha => SignLord::Single(Graha::Surya),
        Rashi::Kanya => SignLord::Single(Graha::Buddh),
        Rashi::Tula => SignLord::Single(Graha::Shukra),
        Rashi::Vrischika => SignLord::Dual(Graha::Mangal, Graha::Ketu, Rashi::Vrischika),
        Rashi::Dhanu => SignLord::Single(Graha::Guru),
        Rashi::Makara => SignLord::Single(Graha::Shani),
        Rashi::Kumbha => SignLord::Dual(Graha::Shani, Graha::Rahu, Rashi::Kumbha),
        Rashi::Meena => SignLord::Single(Graha::Guru),
    }
}
