use chrono::{prelude::*, NaiveDateTime};
use thiserror::Error;

pub const MINUTE_MILLIS: i64 = 1000 * 60;
pub const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;
pub const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

const NAIVE_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateTimeError {
    #[error("Datetime: {0} could not be parsed")]
    Malformed(String),
}

/// Parses the datetime of a reminder event into a UTC timestamp in millis.
///
/// Accepts RFC 3339 strings and naive `YYYY-MM-DD HH:MM:SS` strings, the latter
/// interpreted as UTC.
pub fn parse_datetime_millis(datestr: &str) -> Result<i64, InvalidDateTimeError> {
    let datestr = datestr.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(datestr) {
        return Ok(dt.timestamp_millis());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(datestr, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
        .ok_or_else(|| InvalidDateTimeError::Malformed(datestr.to_string()))
}

/// Timestamp of midnight (UTC) of the day `ts` falls on
pub fn start_of_day_millis(ts: i64) -> i64 {
    ts - ts.rem_euclid(DAY_MILLIS)
}

pub fn format_millis(ts: i64) -> String {
    match Utc.timestamp_millis_opt(ts) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => ts.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_naive_datetimes_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(
            parse_datetime_millis("2024-01-10 09:00:00"),
            Ok(expected.timestamp_millis())
        );
        assert_eq!(
            parse_datetime_millis("2024-01-10T09:00:00"),
            Ok(expected.timestamp_millis())
        );
        assert_eq!(
            parse_datetime_millis("2024-01-10 09:00"),
            Ok(expected.timestamp_millis())
        );
    }

    #[test]
    fn it_parses_rfc3339_with_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(
            parse_datetime_millis("2024-01-10T10:00:00+01:00"),
            Ok(expected.timestamp_millis())
        );
        assert_eq!(
            parse_datetime_millis("2024-01-10T09:00:00Z"),
            Ok(expected.timestamp_millis())
        );
    }

    #[test]
    fn it_rejects_invalid_datetimes() {
        assert!(parse_datetime_millis("").is_err());
        assert!(parse_datetime_millis("tomorrow").is_err());
        assert!(parse_datetime_millis("2024-13-10 09:00:00").is_err());
        assert!(parse_datetime_millis("2024-02-30 09:00:00").is_err());
    }

    #[test]
    fn it_computes_start_of_day() {
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 10, 9, 17, 3)
            .unwrap()
            .timestamp_millis();
        let midnight = Utc
            .with_ymd_and_hms(2024, 1, 10, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(start_of_day_millis(ts), midnight);
        assert_eq!(start_of_day_millis(midnight), midnight);
    }
}
