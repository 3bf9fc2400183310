//! Error types for dasha calculations.
//!
//! Every failure here is a permanent input-validation failure; nothing is
//! transient, so callers never retry.

use crate::rashi::Rashi;

/// Errors from dasha tree generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DashaError {
    /// Ascendant, Moon or graha longitude is non-finite or out of range.
    #[error("invalid longitude for {what}: {value}")]
    InvalidLongitude {
        /// Which input was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A lord table whose weights do not sum to a positive finite value.
    #[error("invalid weight table: {0}")]
    InvalidWeightTable(&'static str),

    /// Out-of-range numeric parameter (fraction, depth, horizon, year length).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The nakshatra-path cell table failed to parse or validate.
    #[error("invalid nakshatra path table: {0}")]
    InvalidPathTable(String),

    /// Both co-lords of a dual-lord sign sit in the exception sign.
    #[error("ambiguous dual lordship for {}", .rashi.name())]
    AmbiguousDualLordship {
        /// The dual-lord sign being resolved.
        rashi: Rashi,
    },

    /// A point-in-time query fell outside the generated tree.
    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// Errors from locating an instant inside a generated tree.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LocateError {
    /// The query is earlier than the tree's first period (before birth).
    #[error("query jd {query_jd} precedes tree start {start_jd}")]
    BeforeStart {
        /// The queried Julian Day.
        query_jd: f64,
        /// First instant covered by the tree.
        start_jd: f64,
    },

    /// The query is at or past the tree's horizon; regenerate with a longer one.
    #[error("query jd {query_jd} is at or beyond tree horizon {end_jd}")]
    AfterHorizon {
        /// The queried Julian Day.
        query_jd: f64,
        /// First instant not covered by the tree.
        end_jd: f64,
    },

    /// Requested depth outside 1..=5.
    #[error("depth {0} outside 1..=5")]
    InvalidDepth(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_longitude() {
        let e = DashaError::InvalidLongitude {
            what: "moon",
            value: 400.0,
        };
        assert_eq!(e.to_string(), "invalid longitude for moon: 400");
    }

    #[test]
    fn display_ambiguous_uses_rashi_name() {
        let e = DashaError::AmbiguousDualLordship {
            rashi: Rashi::Vrischika,
        };
        assert!(e.to_string().contains("Vrischika"));
    }

    #[test]
    fn locate_errors_are_distinct() {
        let before = LocateError::BeforeStart {
            query_jd: 1.0,
            start_jd: 2.0,
        };
        let after = LocateError::AfterHorizon {
            query_jd: 3.0,
            end_jd: 2.0,
        };
        assert_ne!(before, after);
    }

    #[test]
    fn locate_error_converts_transparently() {
        let e: DashaError = LocateError::InvalidDepth(7).into();
        assert_eq!(e.to_string(), "depth 7 outside 1..=5");
    }
}
