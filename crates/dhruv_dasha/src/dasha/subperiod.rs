//! Shared period layout used by every dasha engine.
//!
//! Two sub-period patterns:
//! - Weighted: child duration = (child_weight / total_weight) * parent_duration
//! - Equal: child duration = parent_duration / num_children
//!
//! Durations are always derived by multiplication and ends by addition; the
//! last child's end is snapped to the parent's end so children telescope
//! exactly onto the parent span.

use serde::{Deserialize, Serialize};

use crate::error::DashaError;
use crate::rashi::Rashi;

use super::chara;
use super::lord_table::LordTable;
use super::rashi_util::{Direction, zodiac_sequence};
use super::types::{DashaEntity, MAX_TOP_LEVEL_PERIODS, PeriodNode};

/// How a rashi period is shared among its 12 sub-periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RashiSubPeriodMethod {
    /// Every sub-period gets 1/12 of the parent.
    #[default]
    Equal,
    /// Sub-periods are weighted by each sign's own Mahadasha years.
    Proportional,
}

/// Rule for expanding a period into its sub-periods.
#[derive(Debug, Clone, PartialEq)]
pub enum Subdivision {
    /// Walk the lord table starting at the parent's own lord.
    Proportional(LordTable),
    /// Chara: 12 signs from the parent sign in that sign's own direction.
    Rashi {
        /// Mahadasha years of each sign, indexed by [`Rashi::index`].
        years: [f64; 12],
        /// Weighting policy.
        method: RashiSubPeriodMethod,
    },
    /// Kaal Chakra: 12 signs from the parent sign in the chart's direction,
    /// weighted by sign-class years.
    KaalChakra {
        /// Years of each sign, indexed by [`Rashi::index`].
        weights: [f64; 12],
        /// Traversal direction of the whole tree.
        direction: Direction,
    },
}

impl Subdivision {
    /// All sub-periods of `parent`, one level deeper.
    ///
    /// `None` when the rule does not apply to the parent's owner, such as a
    /// rashi under a graha table or a graha missing from the table.
    pub fn children(&self, parent: &PeriodNode) -> Option<Vec<PeriodNode>> {
        let children = match (self, parent.owner) {
            (Self::Proportional(table), DashaEntity::Graha(lord)) => {
                let seq: Vec<(DashaEntity, f64)> = table
                    .cycle_from(lord)?
                    .map(|(g, w)| (DashaEntity::Graha(g), w))
                    .collect();
                weighted_children(parent, &seq)
            }
            (Self::Rashi { years, method }, DashaEntity::Rashi(sign)) => {
                let seq = zodiac_sequence(sign, chara::direction(sign));
                match method {
                    RashiSubPeriodMethod::Equal => {
                        let entities: Vec<DashaEntity> =
                            seq.iter().map(|&r| DashaEntity::Rashi(r)).collect();
                        equal_children(parent, &entities)
                    }
                    RashiSubPeriodMethod::Proportional => {
                        weighted_children(parent, &rashi_weights(&seq, years))
                    }
                }
            }
            (Self::KaalChakra { weights, direction }, DashaEntity::Rashi(sign)) => {
                let seq = zodiac_sequence(sign, *direction);
                weighted_children(parent, &rashi_weights(&seq, weights))
            }
            _ => return None,
        };
        Some(children)
    }

    /// Materialize `node`'s subtree down to `depth` (1-based).
    pub fn expand(&self, node: &mut PeriodNode, depth: u8) {
        if node.depth >= depth {
            return;
        }
        let Some(mut children) = self.children(node) else {
            return;
        };
        for child in &mut children {
            self.expand(child, depth);
        }
        node.children = Some(children);
    }
}

fn rashi_weights(seq: &[Rashi], weights: &[f64; 12]) -> Vec<(DashaEntity, f64)> {
    seq.iter()
        .map(|&r| (DashaEntity::Rashi(r), weights[r.index() as usize]))
        .collect()
}

/// Lay out `parent`'s children with durations proportional to their weights.
///
/// `sequence`: ordered entities with their weights in any common unit.
pub fn weighted_children(parent: &PeriodNode, sequence: &[(DashaEntity, f64)]) -> Vec<PeriodNode> {
    let total: f64 = sequence.iter().map(|&(_, w)| w).sum();
    if !(total.is_finite() && total > 0.0) {
        return Vec::new();
    }
    let parent_duration = parent.duration_days();
    lay_out(
        parent,
        sequence
            .iter()
            .map(|&(entity, w)| (entity, (w / total) * parent_duration)),
    )
}

/// Lay out `parent`'s children with identical durations.
pub fn equal_children(parent: &PeriodNode, sequence: &[DashaEntity]) -> Vec<PeriodNode> {
    if sequence.is_empty() {
        return Vec::new();
    }
    let child_duration = parent.duration_days() / sequence.len() as f64;
    lay_out(parent, sequence.iter().map(|&e| (e, child_duration)))
}

/// Place consecutive children from `parent.start_jd`, snapping the last end.
///
/// Children that would have no length after rounding are dropped, which
/// keeps `end > start` for every node without breaking contiguity.
fn lay_out<I>(parent: &PeriodNode, durations: I) -> Vec<PeriodNode>
where
    I: ExactSizeIterator<Item = (DashaEntity, f64)>,
{
    let n = durations.len();
    let depth = parent.depth + 1;
    let mut children = Vec::with_capacity(n);
    let mut cursor = parent.start_jd;

    for (i, (entity, duration)) in durations.enumerate() {
        let end = if i + 1 == n {
            parent.end_jd
        } else {
            (cursor + duration).min(parent.end_jd)
        };
        if end > cursor {
            children.push(PeriodNode::leaf(entity, cursor, end, depth));
            cursor = end;
        }
    }
    children
}

/// Build the Mahadasha level from an endless stream of `(entity, days)`.
///
/// Without a horizon exactly `cycle_len` entries are consumed (one cycle).
/// With `horizon_days`, entries are consumed until the level covers
/// `birth_jd + horizon_days`. Entries without positive length are skipped.
pub fn top_level_periods<I>(
    birth_jd: f64,
    entries: I,
    cycle_len: usize,
    horizon_days: Option<f64>,
) -> Result<Vec<PeriodNode>, DashaError>
where
    I: IntoIterator<Item = (DashaEntity, f64)>,
{
    let mut periods = Vec::with_capacity(cycle_len);
    let mut cursor = birth_jd;
    let mut entries = entries.into_iter();

    match horizon_days {
        None => {
            for (entity, days) in entries.take(cycle_len) {
                push_period(&mut periods, &mut cursor, entity, days);
            }
        }
        Some(horizon) => {
            let target = birth_jd + horizon;
            let mut consumed = 0usize;
            while cursor < target {
                if consumed >= MAX_TOP_LEVEL_PERIODS {
                    return Err(DashaError::InvalidInput(
                        "horizon needs too many top-level periods",
                    ));
                }
                let Some((entity, days)) = entries.next() else {
                    break;
                };
                push_period(&mut periods, &mut cursor, entity, days);
                consumed += 1;
            }
        }
    }

    if periods.is_empty() {
        return Err(DashaError::InvalidInput("no period with positive length"));
    }
    Ok(periods)
}

fn push_period(periods: &mut Vec<PeriodNode>, cursor: &mut f64, entity: DashaEntity, days: f64) {
    if !(days.is_finite() && days > 0.0) {
        return;
    }
    let end = *cursor + days;
    if end > *cursor {
        periods.push(PeriodNode::leaf(entity, *cursor, end, 1));
        *cursor = end;
    }
}
