//! Julian Day (UTC) conversions for chrono date-times.
//!
//! Dasha boundaries are kept as JD UTC `f64` internally; chrono is only used
//! at the edges (snapshot construction and rendering).

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert any chrono date-time to JD UTC.
pub fn jd_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let secs = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    JD_UNIX_EPOCH + secs / SECONDS_PER_DAY
}

/// Convert JD UTC to a date-time in `offset`, rounded to the millisecond.
///
/// Returns `None` for non-finite input or instants outside chrono's range.
pub fn datetime_from_jd(jd: f64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if !jd.is_finite() {
        return None;
    }
    let millis = ((jd - JD_UNIX_EPOCH) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    let utc = DateTime::<Utc>::from_timestamp_millis(millis as i64)?;
    Some(utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_is_known_jd() {
        let epoch = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert!((jd_from_datetime(&epoch) - JD_UNIX_EPOCH).abs() < 1e-12);
    }

    #[test]
    fn j2000_noon() {
        let dt = DateTime::parse_from_rfc3339("2000-01-01T12:00:00Z").unwrap();
        assert!((jd_from_datetime(&dt) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn offset_does_not_change_instant() {
        let a = DateTime::parse_from_rfc3339("1990-05-17T04:30:00+05:30").unwrap();
        let b = DateTime::parse_from_rfc3339("1990-05-16T23:00:00Z").unwrap();
        assert!((jd_from_datetime(&a) - jd_from_datetime(&b)).abs() < 1e-12);
    }

    #[test]
    fn roundtrip_keeps_offset() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let dt = DateTime::parse_from_rfc3339("1985-11-03T18:45:10+05:30").unwrap();
        let back = datetime_from_jd(jd_from_datetime(&dt), ist).unwrap();
        assert_eq!(back, dt);
        assert_eq!(back.offset(), &ist);
    }

    #[test]
    fn non_finite_jd_rejected() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert!(datetime_from_jd(f64::NAN, utc).is_none());
        assert!(datetime_from_jd(f64::INFINITY, utc).is_none());
    }
}
