//! Time parsing and arithmetic helpers.
//!
//! Raw clock values arrive from devices and manual entry as strings in a
//! handful of shapes. Every parser here returns a [`TimeParseError`] instead of
//! failing loudly, so callers can decide on the documented fallback.
//!
//! Offsets on incoming instants are dropped and the wall-clock reading is
//! kept. Schedules are authored in outlet-local wall-clock time, and both
//! sides are compared in that frame.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::TimeParseError;

const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_OF_DAY_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses a clock instant.
///
/// Accepts RFC 3339 (`2024-01-05T09:00:00Z`, `2024-01-05T09:00:00+08:00`),
/// naive ISO datetimes with or without seconds, and the space-separated
/// variant.
///
/// # Examples
///
/// ```
/// use timesheet_engine::models::parse_instant;
///
/// let utc = parse_instant("2024-01-05T09:00:00Z").unwrap();
/// let naive = parse_instant("2024-01-05 09:00").unwrap();
/// assert_eq!(utc, naive);
///
/// assert!(parse_instant("yesterday").is_err());
/// ```
pub fn parse_instant(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimeParseError::InvalidInstant {
            input: trimmed.to_string(),
        })
}

/// Parses a time of day such as `09:00:00` or `09:00`.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimeParseError::InvalidTimeOfDay {
            input: trimmed.to_string(),
        })
}

/// Parses a calendar date, normalizing datetimes to their date part.
///
/// # Examples
///
/// ```
/// use timesheet_engine::models::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(parse_calendar_date("2024-01-05").unwrap(), expected);
/// assert_eq!(parse_calendar_date("2024-01-05T00:00:00.000Z").unwrap(), expected);
/// ```
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_instant(trimmed)
        .map(|instant| instant.date())
        .map_err(|_| TimeParseError::InvalidDate {
            input: trimmed.to_string(),
        })
}

/// Returns true if the string parses as a clock instant.
pub fn is_valid_instant(input: &str) -> bool {
    parse_instant(input).is_ok()
}

/// Signed whole minutes from `a` to `b` (`b - a`), truncated toward zero.
///
/// # Examples
///
/// ```
/// use timesheet_engine::models::{minutes_between, parse_instant};
///
/// let a = parse_instant("2024-01-05T09:00:00").unwrap();
/// let b = parse_instant("2024-01-05T09:12:40").unwrap();
/// assert_eq!(minutes_between(a, b), 12);
/// assert_eq!(minutes_between(b, a), -12);
/// ```
pub fn minutes_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    b.signed_duration_since(a).num_minutes()
}

/// Returns true for the `00:00` placeholder stored on open shifts.
pub fn is_midnight_sentinel(time: NaiveTime) -> bool {
    time.hour() == 0 && time.minute() == 0
}

/// Formats a calendar date as the `yyyy-MM-dd` key used in result maps.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
