//! Vedic dasha (planetary period) engine built on resolved chart positions.
//!
//! This crate provides:
//! - Proportional dashas: Vimshottari, Ashtottari and Yogini
//! - Jaimini Chara dasha with dual-lordship resolution
//! - Kaal Chakra dasha over a versioned nakshatra-path table
//! - Lazy point-in-time queries, a content-hashed tree cache and
//!   serializable output records
//!
//! Inputs are sidereal longitudes already computed elsewhere; no ephemeris,
//! ayanamsha or timezone work happens here.

pub mod config;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod lordship;
pub mod nakshatra;
pub mod rashi;
pub mod snapshot;
pub mod time;
pub mod util;

pub use config::DashaConfig;
pub use dasha::{
    DashaCache, DashaEngine, DashaEntity, DashaLevel, DashaOptions, DashaSnapshot, DashaSystem,
    DashaTree, DatePrecision, PeriodNode, dasha_tree, locate, locate_chain, render_tree,
};
pub use error::{DashaError, LocateError};
pub use graha::{ALL_GRAHAS, Graha};
pub use lordship::{SignLord, sign_lord};
pub use nakshatra::{Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use rashi::{ALL_RASHIS, Rashi, rashi_from_longitude};
pub use snapshot::{NatalSnapshot, PlanetaryPosition};
pub use time::{datetime_from_jd, jd_from_datetime};
