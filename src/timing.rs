use crate::types::{MetaResult, MetadataError, Precision};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO-8601-like timestamp string into a UTC instant at the
/// given precision.
///
/// A single trailing `Z` (UTC marker) is accepted and stripped; all
/// inputs are interpreted as UTC either way, which is how SAR product
/// annotations record time. The parsed instant is truncated to
/// `precision`.
pub fn parse_timestring(str_in: &str, precision: Precision) -> MetaResult<DateTime<Utc>> {
    let trimmed = str_in.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    // Annotation files vary in separator and fractional-second length,
    // so try the formats in decreasing order of specificity.
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return truncate_to(naive.and_utc(), precision);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return truncate_to(date.and_time(chrono::NaiveTime::MIN).and_utc(), precision);
    }

    Err(MetadataError::TimeParsing(format!(
        "could not parse timestamp '{}'",
        str_in
    )))
}

/// The signed number of seconds between two instants (`dt1 - dt2`),
/// computed by integer subtraction at the given precision.
///
/// Both instants are truncated to whole ticks at `precision` before
/// subtracting, so sub-tick differences vanish; the epoch arithmetic is
/// carried out in `i128` and cannot overflow at nanosecond precision.
pub fn get_seconds(dt1: &DateTime<Utc>, dt2: &DateTime<Utc>, precision: Precision) -> f64 {
    let t1 = epoch_ticks(dt1, precision);
    let t2 = epoch_ticks(dt2, precision);
    (t1 - t2) as f64 * precision.scale()
}

/// Whole ticks since the Unix epoch at the given precision (truncating)
fn epoch_ticks(dt: &DateTime<Utc>, precision: Precision) -> i128 {
    match precision {
        Precision::Seconds => dt.timestamp() as i128,
        Precision::Milliseconds => dt.timestamp_millis() as i128,
        Precision::Microseconds => dt.timestamp_micros() as i128,
        Precision::Nanoseconds => {
            dt.timestamp() as i128 * 1_000_000_000 + dt.timestamp_subsec_nanos() as i128
        }
    }
}

fn truncate_to(dt: DateTime<Utc>, precision: Precision) -> MetaResult<DateTime<Utc>> {
    let truncated = match precision {
        Precision::Seconds => DateTime::from_timestamp(dt.timestamp(), 0),
        Precision::Milliseconds => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        Precision::Microseconds => DateTime::from_timestamp_micros(dt.timestamp_micros()),
        Precision::Nanoseconds => Some(dt),
    };
    truncated.ok_or_else(|| {
        MetadataError::TimeParsing(format!("timestamp {} out of representable range", dt))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn us(s: &str) -> DateTime<Utc> {
        parse_timestring(s, Precision::Microseconds).unwrap()
    }

    #[test]
    fn test_parse_with_and_without_trailing_z() {
        assert_eq!(
            us("2020-01-03T17:08:15.123456Z"),
            us("2020-01-03T17:08:15.123456")
        );
    }

    #[test]
    fn test_parse_whole_seconds() {
        let dt = us("2020-01-03T17:08:15");
        assert_eq!(dt.timestamp_subsec_micros(), 0);
        assert_eq!(dt.to_rfc3339(), "2020-01-03T17:08:15+00:00");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = us("2021-06-15");
        assert_eq!(dt, us("2021-06-15T00:00:00"));
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(us("2020-01-03 17:08:15.5"), us("2020-01-03T17:08:15.5"));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(parse_timestring("not a time", Precision::Microseconds).is_err());
        assert!(parse_timestring("", Precision::Microseconds).is_err());
    }

    #[test]
    fn test_parse_truncates_to_precision() {
        let coarse = parse_timestring("2020-01-03T17:08:15.999999", Precision::Seconds).unwrap();
        assert_eq!(coarse, us("2020-01-03T17:08:15"));

        let ms = parse_timestring("2020-01-03T17:08:15.123456", Precision::Milliseconds).unwrap();
        assert_eq!(ms.timestamp_subsec_micros(), 123_000);
    }

    #[test]
    fn test_get_seconds_zero_for_same_instant() {
        let t = us("2020-01-03T17:08:15.123456");
        for p in [
            Precision::Seconds,
            Precision::Milliseconds,
            Precision::Microseconds,
            Precision::Nanoseconds,
        ] {
            assert_eq!(get_seconds(&t, &t, p), 0.0);
        }
    }

    #[test]
    fn test_get_seconds_signed() {
        let t1 = us("2020-01-03T17:08:15.000000");
        let t2 = us("2020-01-03T17:08:12.500000");
        assert_relative_eq!(get_seconds(&t1, &t2, Precision::Microseconds), 2.5);
        assert_relative_eq!(get_seconds(&t2, &t1, Precision::Microseconds), -2.5);
    }

    #[test]
    fn test_get_seconds_antisymmetric() {
        let t1 = us("2019-12-31T23:59:59.999999");
        let t2 = us("2020-01-01T00:00:00.000001");
        for p in [
            Precision::Seconds,
            Precision::Milliseconds,
            Precision::Microseconds,
            Precision::Nanoseconds,
        ] {
            assert_eq!(get_seconds(&t1, &t2, p), -get_seconds(&t2, &t1, p));
        }
    }

    #[test]
    fn test_get_seconds_truncates_at_coarse_precision() {
        let t1 = us("2020-01-03T17:08:15.999999");
        let t2 = us("2020-01-03T17:08:15.000001");
        assert_eq!(get_seconds(&t1, &t2, Precision::Seconds), 0.0);
        assert_relative_eq!(
            get_seconds(&t1, &t2, Precision::Microseconds),
            0.999998,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_get_seconds_across_days() {
        let t1 = us("2020-01-04T00:00:30");
        let t2 = us("2020-01-03T23:59:30");
        assert_relative_eq!(get_seconds(&t1, &t2, Precision::Seconds), 60.0);
    }
}
