//! Dasha (planetary period) calculations for Vedic astrology.
//!
//! Implements 5 dasha systems across 3 engines:
//! - Proportional (3 systems): Vimshottari, Ashtottari, Yogini
//! - Sign-based (1 system): Chara
//! - Nakshatra-path (1 system): Kaal Chakra
//!
//! Each system supports 5 hierarchical levels (Mahadasha through Pranadasha).
//! Trees are generated to a chosen depth; [`query`] expands deeper levels on
//! demand, and [`cache`] stores trees by a content hash of their inputs.

pub mod balance;
pub mod cache;
pub mod engine;
pub mod lord_table;
pub mod options;
pub mod proportional;
pub mod query;
pub mod render;
pub mod rashi_util;
pub mod subperiod;
pub mod types;

// Rashi-based systems
pub mod chara;
pub mod kaal_chakra;
pub mod kaal_chakra_data;

pub use balance::{nakshatra_birth_balance, pada_birth_balance, rashi_birth_balance};
pub use cache::{CacheKey, DashaCache};
pub use chara::{LordResolution, LordRule, chara_tree, duration_for_sign, resolve_lord, sign_years};
pub use engine::{DashaEngine, dasha_tree};
pub use kaal_chakra::{
    PathSeed, balance_of_first_period, cycle_years, kaal_chakra_tree, kaal_chakra_tree_with,
    path_seed,
};
pub use kaal_chakra_data::{
    BUILTIN_TABLE_VERSION, NakshatraPathTable, PathCell, PathDirection, SignClassWeights,
};
pub use lord_table::{
    LordTable, ashtottari_table, lord_table_for, vimshottari_table, yogini_name, yogini_table,
};
pub use options::{DEFAULT_DASHA_DEPTH, DashaOptions};
pub use proportional::{
    ashtottari_tree, proportional_tree, proportional_tree_from, vimshottari_tree, yogini_tree,
};
pub use query::{find_active_period, locate, locate_chain};
pub use render::{
    DatePrecision, PeriodRecord, SnapshotRecord, TreeRecord, format_jd, render_period,
    render_snapshot, render_tree,
};
pub use rashi_util::{
    Direction, SignType, count_steps, is_odd_sign, sign_type, step, zodiac_sequence,
};
pub use subperiod::{RashiSubPeriodMethod, Subdivision, equal_children, weighted_children};
pub use types::{
    ALL_DASHA_SYSTEMS, DAYS_PER_YEAR, DashaEntity, DashaLevel, DashaSnapshot, DashaSystem,
    DashaTree, MAX_DASHA_DEPTH, MAX_TOP_LEVEL_PERIODS, MIN_DASHA_DEPTH, PeriodNode,
};
