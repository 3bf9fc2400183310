//! Point-in-time lookup over a generated dasha tree.
//!
//! Levels that were materialized are walked in place; anything deeper is
//! expanded on the fly with the tree's own subdivision rule, so a depth-1 tree
//! can still answer a Pranadasha query without building 12^5 nodes.

use std::borrow::Cow;

use crate::error::LocateError;

use super::types::{DashaSnapshot, DashaTree, MAX_DASHA_DEPTH, MIN_DASHA_DEPTH, PeriodNode};

/// Index of the period containing `jd`, if any (linear scan, half-open spans).
pub fn find_active_period(periods: &[PeriodNode], jd: f64) -> Option<usize> {
    periods.iter().position(|p| p.contains(jd))
}

/// Node at `depth` (1-based) whose span contains `jd`.
///
/// The result borrows from the tree when that level is materialized and is
/// owned (without children) when it had to be expanded.
pub fn locate(tree: &DashaTree, jd: f64, depth: u8) -> Result<Cow<'_, PeriodNode>, LocateError> {
    descend(tree, jd, depth, |_| {})
}

/// Active period at every level from Mahadasha down to `depth`.
pub fn locate_chain(tree: &DashaTree, jd: f64, depth: u8) -> Result<DashaSnapshot, LocateError> {
    let mut periods = Vec::with_capacity(depth as usize);
    descend(tree, jd, depth, |node| periods.push(node.without_children()))?;
    Ok(DashaSnapshot {
        system: tree.system,
        query_jd: jd,
        periods,
    })
}

fn check_query(tree: &DashaTree, jd: f64, depth: u8) -> Result<(), LocateError> {
    if !(MIN_DASHA_DEPTH..=MAX_DASHA_DEPTH).contains(&depth) {
        return Err(LocateError::InvalidDepth(depth));
    }
    // NaN compares false both ways; report it as before the start.
    if !(jd >= tree.start_jd()) {
        return Err(LocateError::BeforeStart {
            query_jd: jd,
            start_jd: tree.start_jd(),
        });
    }
    if jd >= tree.end_jd() {
        return Err(LocateError::AfterHorizon {
            query_jd: jd,
            end_jd: tree.end_jd(),
        });
    }
    Ok(())
}

fn descend<'a, F>(
    tree: &'a DashaTree,
    jd: f64,
    depth: u8,
    mut visit: F,
) -> Result<Cow<'a, PeriodNode>, LocateError>
where
    F: FnMut(&PeriodNode),
{
    check_query(tree, jd, depth)?;
    let idx = find_active_period(&tree.top_level, jd).ok_or(LocateError::AfterHorizon {
        query_jd: jd,
        end_jd: tree.end_jd(),
    })?;

    let mut node: Cow<'a, PeriodNode> = Cow::Borrowed(&tree.top_level[idx]);
    loop {
        visit(&node);
        if node.depth >= depth {
            break;
        }
        let next = match &node {
            Cow::Borrowed(parent) => {
                let parent: &'a PeriodNode = *parent;
                match parent.children.as_deref() {
                    Some(children) => {
                        find_active_period(children, jd).map(|i| Cow::Borrowed(&children[i]))
                    }
                    None => expand_active(tree, parent, jd),
                }
            }
            Cow::Owned(parent) => expand_active(tree, parent, jd),
        };
        // Children tile the parent, so a miss only happens for an owner the
        // subdivision rule does not know; stop at the deepest match.
        match next {
            Some(child) => node = child,
            None => break,
        }
    }
    Ok(node)
}

fn expand_active<'a>(
    tree: &DashaTree,
    parent: &PeriodNode,
    jd: f64,
) -> Option<Cow<'a, PeriodNode>> {
    let children = tree.subdivision.children(parent)?;
    let idx = find_active_period(&children, jd)?;
    children.into_iter().nth(idx).map(Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::lord_table::vimshottari_table;
    use crate::dasha::options::DashaOptions;
    use crate::dasha::proportional::proportional_tree_from;
    use crate::dasha::types::{DAYS_PER_YEAR, DashaEntity};
    use crate::graha::Graha;
    use chrono::FixedOffset;

    const BIRTH_JD: f64 = 2451545.0;

    fn tree(depth: u8) -> DashaTree {
        let table = vimshottari_table().unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        proportional_tree_from(BIRTH_JD, utc, &table, 0, 0.25, &DashaOptions::new(depth)).unwrap()
    }

    #[test]
    fn finds_period_by_half_open_span() {
        let t = tree(1);
        assert_eq!(find_active_period(&t.top_level, BIRTH_JD), Some(0));
        let boundary = t.top_level[0].end_jd;
        assert_eq!(find_active_period(&t.top_level, boundary), Some(1));
        assert_eq!(find_active_period(&t.top_level, BIRTH_JD - 1.0), None);
    }

    #[test]
    fn materialized_levels_are_borrowed() {
        let t = tree(2);
        let node = locate(&t, BIRTH_JD + 10.0 * DAYS_PER_YEAR, 2).unwrap();
        assert!(matches!(node, Cow::Borrowed(_)));
        assert_eq!(node.depth, 2);
    }

    #[test]
    fn deeper_levels_are_expanded_lazily() {
        let shallow = tree(1);
        let deep = tree(5);
        let jd = BIRTH_JD + 33.3 * DAYS_PER_YEAR;
        let lazy = locate(&shallow, jd, 5).unwrap();
        let eager = locate(&deep, jd, 5).unwrap();
        assert!(matches!(lazy, Cow::Owned(_)));
        assert_eq!(lazy.owner, eager.owner);
        assert_eq!(lazy.start_jd, eager.start_jd);
        assert_eq!(lazy.end_jd, eager.end_jd);
        assert!(lazy.contains(jd));
    }

    #[test]
    fn birth_instant_is_first_mahadasha() {
        let t = tree(3);
        let node = locate(&t, BIRTH_JD, 1).unwrap();
        assert_eq!(node.owner, DashaEntity::Graha(Graha::Ketu));
    }

    #[test]
    fn out_of_range_queries() {
        let t = tree(1);
        assert!(matches!(
            locate(&t, BIRTH_JD - 1e-6, 1),
            Err(LocateError::BeforeStart { .. })
        ));
        assert!(matches!(
            locate(&t, t.end_jd(), 1),
            Err(LocateError::AfterHorizon { .. })
        ));
        assert!(matches!(
            locate(&t, f64::NAN, 1),
            Err(LocateError::BeforeStart { .. })
        ));
        assert_eq!(
            locate(&t, BIRTH_JD, 0).unwrap_err(),
            LocateError::InvalidDepth(0)
        );
        assert_eq!(
            locate(&t, BIRTH_JD, 6).unwrap_err(),
            LocateError::InvalidDepth(6)
        );
    }

    #[test]
    fn chain_nests_from_mahadasha_down() {
        let t = tree(2);
        let jd = BIRTH_JD + 50.0 * DAYS_PER_YEAR;
        let snap = locate_chain(&t, jd, 4).unwrap();
        assert_eq!(snap.periods.len(), 4);
        assert_eq!(snap.query_jd, jd);
        for (i, p) in snap.periods.iter().enumerate() {
            assert_eq!(p.depth as usize, i + 1);
            assert!(p.contains(jd));
            assert!(p.children.is_none());
        }
        for w in snap.periods.windows(2) {
            assert!(w[1].start_jd >= w[0].start_jd);
            assert!(w[1].end_jd <= w[0].end_jd);
        }
        // A sub-period chain always opens with its parent's lord at the parent start.
        let maha = &snap.periods[0];
        let first_antar = locate(&t, maha.start_jd, 2).unwrap();
        assert_eq!(first_antar.owner, maha.owner);
    }
}
