//! Core types for dasha (planetary period) calculations.
//!
//! Dashas are hierarchical time-period systems from Vedic astrology (BPHS).
//! This module defines the period tree shared by every supported system.
//! All instants are Julian Days in UTC; a period covers `[start_jd, end_jd)`.

use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::rashi::Rashi;

use super::subperiod::Subdivision;

/// Default year length for dasha period calculations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Shallowest level (Mahadasha).
pub const MIN_DASHA_DEPTH: u8 = 1;

/// Deepest level (Pranadasha).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Cap on top-level periods when a horizon override is given.
pub const MAX_TOP_LEVEL_PERIODS: usize = 1_000;

/// 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 1,
    Antardasha = 2,
    Pratyantardasha = 3,
    Sookshmadasha = 4,
    Pranadasha = 5,
}

impl DashaLevel {
    /// Level for a 1-based depth.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Antardasha),
            3 => Some(Self::Pratyantardasha),
            4 => Some(Self::Sookshmadasha),
            5 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    /// 1-based depth of this level.
    pub const fn depth(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => Some(Self::Sookshmadasha),
            Self::Sookshmadasha => Some(Self::Pranadasha),
            Self::Pranadasha => None,
        }
    }
}

/// Supported dasha systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DashaSystem {
    /// 120-year proportional system seeded by the Moon's nakshatra.
    Vimshottari = 0,
    /// 108-year proportional variant.
    Ashtottari = 1,
    /// 36-year proportional variant with eight yoginis.
    Yogini = 2,
    /// Jaimini sign-based system seeded by the ascendant.
    Chara = 3,
    /// Nakshatra-pada path system with mirrored traversal.
    KaalChakra = 4,
}

/// All supported systems in order.
pub const ALL_DASHA_SYSTEMS: [DashaSystem; 5] = [
    DashaSystem::Vimshottari,
    DashaSystem::Ashtottari,
    DashaSystem::Yogini,
    DashaSystem::Chara,
    DashaSystem::KaalChakra,
];

impl DashaSystem {
    /// Create from repr(u8) value.
    pub fn from_u8(v: u8) -> Option<Self> {
        ALL_DASHA_SYSTEMS.get(v as usize).copied()
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vimshottari => "Vimshottari",
            Self::Ashtottari => "Ashtottari",
            Self::Yogini => "Yogini",
            Self::Chara => "Chara",
            Self::KaalChakra => "Kaal Chakra",
        }
    }

    /// Stable identifier used in serialized output and configuration.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Vimshottari => "vimshottari",
            Self::Ashtottari => "ashtottari",
            Self::Yogini => "yogini",
            Self::Chara => "chara",
            Self::KaalChakra => "kaal_chakra",
        }
    }
}

impl fmt::Display for DashaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DashaSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ALL_DASHA_SYSTEMS
            .iter()
            .copied()
            .find(|sys| sys.id() == key)
            .ok_or_else(|| format!("unknown dasha system: {s}"))
    }
}

/// What entity rules a dasha period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashaEntity {
    /// Proportional systems.
    Graha(Graha),
    /// Sign-based and nakshatra-path systems.
    Rashi(Rashi),
}

impl DashaEntity {
    /// Sanskrit name of the ruling graha or rashi.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Graha(g) => g.name(),
            Self::Rashi(r) => r.name(),
        }
    }

    /// The ruling graha, for graha-owned periods.
    pub const fn graha(&self) -> Option<Graha> {
        match self {
            Self::Graha(g) => Some(*g),
            Self::Rashi(_) => None,
        }
    }

    /// The ruling rashi, for rashi-owned periods.
    pub const fn rashi(&self) -> Option<Rashi> {
        match self {
            Self::Rashi(r) => Some(*r),
            Self::Graha(_) => None,
        }
    }
}

/// A single dasha period and, when materialized, its sub-periods.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodNode {
    /// The entity ruling this period.
    pub owner: DashaEntity,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    /// 1-based depth (1 = Mahadasha).
    pub depth: u8,
    /// Sub-periods, present only down to the generated depth.
    pub children: Option<Vec<PeriodNode>>,
}

impl PeriodNode {
    /// Leaf node with no materialized children.
    pub fn leaf(owner: DashaEntity, start_jd: f64, end_jd: f64, depth: u8) -> Self {
        Self {
            owner,
            start_jd,
            end_jd,
            depth,
            children: None,
        }
    }

    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// True if `jd` falls inside `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// Level of this node.
    pub fn level(&self) -> Option<DashaLevel> {
        DashaLevel::from_depth(self.depth)
    }

    /// Copy of this node without its subtree.
    pub fn without_children(&self) -> Self {
        Self::leaf(self.owner, self.start_jd, self.end_jd, self.depth)
    }
}

/// Generated period tree for one system and one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaTree {
    /// Which system produced this tree.
    pub system: DashaSystem,
    /// Birth JD UTC.
    pub birth_jd: f64,
    /// UTC offset of the birth instant, used when rendering dates.
    pub utc_offset: FixedOffset,
    /// Mahadasha sequence.
    pub top_level: Vec<PeriodNode>,
    /// `(first start, last end)` of the top level.
    pub span: (f64, f64),
    /// Depth materialized in `top_level`.
    pub depth: u8,
    /// Rule for expanding any node one level deeper.
    pub subdivision: Subdivision,
}

impl DashaTree {
    /// Expand `top_level` to `depth` and wrap it into a tree.
    pub(crate) fn assemble(
        system: DashaSystem,
        birth_jd: f64,
        utc_offset: FixedOffset,
        mut top_level: Vec<PeriodNode>,
        subdivision: Subdivision,
        depth: u8,
    ) -> Self {
        for node in &mut top_level {
            subdivision.expand(node, depth);
        }
        let span = match (top_level.first(), top_level.last()) {
            (Some(first), Some(last)) => (first.start_jd, last.end_jd),
            _ => (birth_jd, birth_jd),
        };
        Self {
            system,
            birth_jd,
            utc_offset,
            top_level,
            span,
            depth,
            subdivision,
        }
    }

    /// First instant covered by the tree.
    pub fn start_jd(&self) -> f64 {
        self.span.0
    }

    /// First instant no longer covered by the tree.
    pub fn end_jd(&self) -> f64 {
        self.span.1
    }

    /// Total number of materialized nodes.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[PeriodNode]) -> usize {
            nodes
                .iter()
                .map(|n| 1 + n.children.as_deref().map_or(0, count))
                .sum()
        }
        count(&self.top_level)
    }
}

/// Active periods at a specific instant, one per level from Mahadasha down.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaSnapshot {
    /// Which system produced this snapshot.
    pub system: DashaSystem,
    /// The queried JD UTC.
    pub query_jd: f64,
    /// Active periods: `periods[0]` is the Mahadasha, `[1]` the Antardasha, etc.
    /// Nodes carry no children.
    pub periods: Vec<PeriodNode>,
}
