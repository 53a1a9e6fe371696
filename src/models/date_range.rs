//! Inclusive calendar date ranges.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::time::parse_calendar_date;
use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar days, `start` through `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting a start after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from request strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::DateRange;
    ///
    /// let range = DateRange::parse("2024-01-01", "2024-01-07").unwrap();
    /// assert_eq!(range.days(), 7);
    ///
    /// assert!(DateRange::parse("2024-01-07", "2024-01-01").is_err());
    /// assert!(DateRange::parse("soon", "2024-01-01").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        let start = parse_calendar_date(start).map_err(|source| EngineError::InvalidDate {
            field: "start_date".to_string(),
            source,
        })?;
        let end = parse_calendar_date(end).map_err(|source| EngineError::InvalidDate {
            field: "end_date".to_string(),
            source,
        })?;
        Self::new(start, end)
    }

    /// Returns true if the day lies within the range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the instant lies between the start of the first day and the end of the last.
    pub fn contains_instant(&self, instant: NaiveDateTime) -> bool {
        self.contains_date(instant.date())
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
