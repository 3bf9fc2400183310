//! Chara (Jaimini) dasha: rashi-based, variable periods.
//!
//! Period = number of signs counted from a rashi to the rashi holding its lord.
//! Signs at even indices (Mesha, Mithuna, ...) count forward, the others count
//! backward. A lord in its own sign gives 12 years.
//!
//! Starting rashi: lagna rashi, traversed in the lagna's own direction.
//! Vrischika and Kumbha have two lords each; the one whose position counts
//! is picked by [`resolve_lord`].

use tracing::{debug, warn};

use crate::error::DashaError;
use crate::graha::Graha;
use crate::lordship::{SignLord, sign_lord};
use crate::rashi::Rashi;
use crate::snapshot::NatalSnapshot;

use super::balance::rashi_birth_balance;
use super::options::DashaOptions;
use super::rashi_util::{Direction, count_steps, is_odd_sign, zodiac_sequence};
use super::subperiod::{Subdivision, top_level_periods};
use super::types::{DashaEntity, DashaSystem, DashaTree};

/// Traversal direction for a sequence starting at `rashi`.
///
/// Forward for Mesha, Mithuna, Simha, Tula, Dhanu and Kumbha; reverse for
/// the other six.
pub const fn direction(rashi: Rashi) -> Direction {
    if is_odd_sign(rashi) {
        Direction::Forward
    } else {
        Direction::Reverse
    }
}

/// The 12 Mahadasha signs from `start` in `direction`.
pub fn sequence(start: Rashi, direction: Direction) -> [Rashi; 12] {
    zodiac_sequence(start, direction)
}

/// Which step of the dual-lordship cascade settled the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LordRule {
    /// The sign has a single lord.
    Single,
    /// Exactly one co-lord sat in the exception sign and was discarded.
    Exception,
    /// The co-lord with more co-occupants won.
    Crowd,
    /// The exalted co-lord won.
    Exaltation,
    /// The co-lord further into its sign won (first-listed on a tie).
    Degree,
}

/// Effective lord of a rashi for period counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LordResolution {
    /// The graha whose position counts.
    pub graha: Graha,
    /// Rashi occupied by that graha.
    pub rashi: Rashi,
    /// Rule that decided it.
    pub rule: LordRule,
}

/// Resolve the effective lord of `rashi` and where it sits.
///
/// When both co-lords sit in the exception sign the exception rule cannot
/// apply. With `strict` this is an [`DashaError::AmbiguousDualLordship`];
/// otherwise the cascade continues at the crowd rule.
pub fn resolve_lord(
    rashi: Rashi,
    snapshot: &NatalSnapshot,
    strict: bool,
) -> Result<LordResolution, DashaError> {
    match sign_lord(rashi) {
        SignLord::Single(graha) => Ok(LordResolution {
            graha,
            rashi: snapshot.position(graha).rashi(),
            rule: LordRule::Single,
        }),
        SignLord::Dual(p1, p2, exception) => {
            let (resolution, ambiguous) = resolve_dual(p1, p2, exception, snapshot);
            if ambiguous {
                if strict {
                    return Err(DashaError::AmbiguousDualLordship { rashi });
                }
                warn!(
                    rashi = rashi.name(),
                    "both co-lords in exception sign, falling back to crowd rule"
                );
            }
            debug!(
                rashi = rashi.name(),
                lord = resolution.graha.name(),
                rule = ?resolution.rule,
                "dual lordship resolved"
            );
            Ok(resolution)
        }
    }
}

/// The tie-break cascade. The flag is set when both co-lords sat in the
/// exception sign.
fn resolve_dual(
    p1: Graha,
    p2: Graha,
    exception: Rashi,
    snapshot: &NatalSnapshot,
) -> (LordResolution, bool) {
    let pos1 = snapshot.position(p1);
    let pos2 = snapshot.position(p2);
    let pick = |graha: Graha, rule: LordRule| LordResolution {
        graha,
        rashi: snapshot.position(graha).rashi(),
        rule,
    };

    let in1 = pos1.rashi() == exception;
    let in2 = pos2.rashi() == exception;
    match (in1, in2) {
        (true, false) => return (pick(p2, LordRule::Exception), false),
        (false, true) => return (pick(p1, LordRule::Exception), false),
        _ => {}
    }
    let ambiguous = in1 && in2;

    let crowd1 = snapshot.co_occupants(p1);
    let crowd2 = snapshot.co_occupants(p2);
    if crowd1 != crowd2 {
        let winner = if crowd1 > crowd2 { p1 } else { p2 };
        return (pick(winner, LordRule::Crowd), ambiguous);
    }

    let exalted1 = pos1.rashi() == p1.exaltation_rashi();
    let exalted2 = pos2.rashi() == p2.exaltation_rashi();
    if exalted1 != exalted2 {
        let winner = if exalted1 { p1 } else { p2 };
        return (pick(winner, LordRule::Exaltation), ambiguous);
    }

    let winner = if pos2.degree_in_rashi() > pos1.degree_in_rashi() {
        p2
    } else {
        p1
    };
    (pick(winner, LordRule::Degree), ambiguous)
}

/// Count signs from `rashi` to the rashi of its lord: 1..=12 years.
fn years_to_lord(rashi: Rashi, lord_rashi: Rashi) -> u8 {
    match count_steps(rashi, lord_rashi, direction(rashi)) {
        0 => 12,
        steps => steps,
    }
}

/// Mahadasha years of `rashi`, in [1, 12].
///
/// Twelve exactly when the effective lord occupies `rashi` itself.
pub fn duration_for_sign(rashi: Rashi, snapshot: &NatalSnapshot) -> u8 {
    let lord_rashi = match sign_lord(rashi) {
        SignLord::Single(graha) => snapshot.position(graha).rashi(),
        SignLord::Dual(p1, p2, exception) => resolve_dual(p1, p2, exception, snapshot).0.rashi,
    };
    years_to_lord(rashi, lord_rashi)
}

/// Mahadasha years of all 12 rashis, indexed by [`Rashi::index`].
pub fn sign_years(snapshot: &NatalSnapshot, strict: bool) -> Result<[u8; 12], DashaError> {
    let mut years = [0u8; 12];
    for rashi in Rashi::all() {
        let lord = resolve_lord(*rashi, snapshot, strict)?;
        years[rashi.index() as usize] = years_to_lord(*rashi, lord.rashi);
    }
    Ok(years)
}

/// Generate the Chara dasha tree.
///
/// The first Mahadasha keeps the part of its years the lagna has not yet
/// crossed in its sign. A horizon beyond the first cycle continues with the
/// second-cycle rule: each sign gets `12 - years`, and signs left with
/// nothing are skipped. Later cycles alternate between the two.
pub fn chara_tree(
    snapshot: &NatalSnapshot,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    options.validate()?;
    let years = sign_years(snapshot, options.strict_dual_lordship)?;

    let lagna = snapshot.ascendant();
    let dir = direction(lagna.rashi());
    let seq = sequence(lagna.rashi(), dir);
    let lagna_years = f64::from(years[lagna.rashi().index() as usize]);
    let (balance_years, _elapsed) = rashi_birth_balance(lagna.degree_in_rashi(), lagna_years);

    debug!(
        lagna = lagna.rashi().name(),
        direction = ?dir,
        balance_years,
        "chara sequence seeded"
    );

    let year_length = options.year_length_days;
    let entries = (0usize..).flat_map(move |cycle| {
        seq.into_iter().enumerate().map(move |(i, rashi)| {
            let full = f64::from(years[rashi.index() as usize]);
            let y = if cycle == 0 && i == 0 {
                balance_years
            } else if cycle % 2 == 1 {
                12.0 - full
            } else {
                full
            };
            (DashaEntity::Rashi(rashi), y * year_length)
        })
    });
    let top_level = top_level_periods(snapshot.birth_jd(), entries, 12, options.horizon_days())?;

    let mut weights = [0.0; 12];
    for (w, y) in weights.iter_mut().zip(years) {
        *w = f64::from(y);
    }

    Ok(DashaTree::assemble(
        DashaSystem::Chara,
        snapshot.birth_jd(),
        snapshot.utc_offset(),
        top_level,
        Subdivision::Rashi {
            years: weights,
            method: options.chara_sub_periods,
        },
        options.depth,
    ))
}
