//! Serializable output records for generated trees and snapshots.
//!
//! Boundaries stay JD UTC internally. Rendering converts them into the birth
//! offset and, by default, keeps only the calendar date.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::DashaError;
use crate::time::datetime_from_jd;

use super::types::{DashaEntity, DashaSnapshot, DashaTree, PeriodNode};

/// Granularity of rendered dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecision {
    /// `YYYY-MM-DD` in the birth offset.
    #[default]
    Day,
    /// RFC 3339 with milliseconds and the birth offset.
    Full,
}

/// One rendered period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRecord {
    pub owner: DashaEntity,
    pub start: String,
    pub end: String,
    pub depth: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PeriodRecord>>,
}

/// One rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRecord {
    pub system_id: &'static str,
    pub top_level: Vec<PeriodRecord>,
}

/// Active periods at one instant, rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRecord {
    pub system_id: &'static str,
    pub at: String,
    pub periods: Vec<PeriodRecord>,
}

/// Render a whole tree, children included down to its materialized depth.
pub fn render_tree(tree: &DashaTree, precision: DatePrecision) -> Result<TreeRecord, DashaError> {
    let top_level = tree
        .top_level
        .iter()
        .map(|node| render_period(node, tree.utc_offset, precision))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TreeRecord {
        system_id: tree.system.id(),
        top_level,
    })
}

/// Render a snapshot in `offset`.
pub fn render_snapshot(
    snapshot: &DashaSnapshot,
    offset: FixedOffset,
    precision: DatePrecision,
) -> Result<SnapshotRecord, DashaError> {
    let periods = snapshot
        .periods
        .iter()
        .map(|node| render_period(node, offset, precision))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SnapshotRecord {
        system_id: snapshot.system.id(),
        at: format_jd(snapshot.query_jd, offset, DatePrecision::Full)?,
        periods,
    })
}

/// Render one node and its materialized subtree.
pub fn render_period(
    node: &PeriodNode,
    offset: FixedOffset,
    precision: DatePrecision,
) -> Result<PeriodRecord, DashaError> {
    let children = match &node.children {
        Some(children) => Some(
            children
                .iter()
                .map(|c| render_period(c, offset, precision))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };
    Ok(PeriodRecord {
        owner: node.owner,
        start: format_jd(node.start_jd, offset, precision)?,
        end: format_jd(node.end_jd, offset, precision)?,
        depth: node.depth,
        children,
    })
}

/// Format a JD UTC instant in `offset`.
pub fn format_jd(
    jd: f64,
    offset: FixedOffset,
    precision: DatePrecision,
) -> Result<String, DashaError> {
    let dt = datetime_from_jd(jd, offset)
        .ok_or(DashaError::InvalidInput("instant outside representable dates"))?;
    Ok(format_datetime(&dt, precision))
}

fn format_datetime(dt: &DateTime<FixedOffset>, precision: DatePrecision) -> String {
    match precision {
        DatePrecision::Day => dt.date_naive().format("%Y-%m-%d").to_string(),
        DatePrecision::Full => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
