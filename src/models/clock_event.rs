//! Clock events and break intervals.
//!
//! A [`ClockEvent`] is a single captured instant. Breaks on a time record are
//! pairs of clock events ([`BreakInterval`]); breaks on a schedule are pairs of
//! times of day ([`ScheduledBreak`]). Both sides carry at most
//! [`BREAK_SLOTS`] breaks, addressed by index (slot 0 is "break 1").

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time::minutes_between;

/// Number of break slots carried by time records and schedules.
pub const BREAK_SLOTS: usize = 3;

/// Fixed set of optional break slots.
pub type BreakSlots<T> = [Option<T>; BREAK_SLOTS];

/// A captured clock instant with its optional note and evidence image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The wall-clock instant the event was captured.
    pub instant: NaiveDateTime,
    /// Free-text note entered with the event.
    #[serde(default)]
    pub note: Option<String>,
    /// Opaque reference to the evidence image.
    #[serde(default)]
    pub image: Option<String>,
}

impl ClockEvent {
    /// Creates an event at the given instant with no note or image.
    pub fn at(instant: NaiveDateTime) -> Self {
        Self {
            instant,
            note: None,
            image: None,
        }
    }

    /// Returns the calendar date the event fell on.
    pub fn date(&self) -> NaiveDate {
        self.instant.date()
    }
}

/// A break taken during an attendance, with either end possibly missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreakInterval {
    /// When the break started.
    #[serde(default)]
    pub start: Option<ClockEvent>,
    /// When the break ended.
    #[serde(default)]
    pub end: Option<ClockEvent>,
    /// Display label for the break.
    #[serde(default)]
    pub label: Option<String>,
    /// Whether the break is paid.
    #[serde(default)]
    pub is_paid: bool,
}

impl BreakInterval {
    /// Creates an unpaid, unlabelled break between two instants.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(ClockEvent::at(start)),
            end: Some(ClockEvent::at(end)),
            label: None,
            is_paid: false,
        }
    }

    /// Returns true if both ends have been captured.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Length of the break in whole minutes.
    ///
    /// Zero when either end is missing or the ends are inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::{BreakInterval, parse_instant};
    ///
    /// let lunch = BreakInterval::between(
    ///     parse_instant("2024-01-05T12:00:00").unwrap(),
    ///     parse_instant("2024-01-05T12:45:00").unwrap(),
    /// );
    /// assert_eq!(lunch.duration_minutes(), 45);
    /// ```
    pub fn duration_minutes(&self) -> i64 {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => minutes_between(start.instant, end.instant).max(0),
            _ => 0,
        }
    }
}

/// A planned break on a schedule, expressed as times of day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduledBreak {
    /// Planned start of the break.
    #[serde(default)]
    pub start: Option<NaiveTime>,
    /// Planned end of the break.
    #[serde(default)]
    pub end: Option<NaiveTime>,
    /// Display label for the break.
    #[serde(default)]
    pub label: Option<String>,
    /// Whether the break is paid.
    #[serde(default)]
    pub is_paid: bool,
}

impl ScheduledBreak {
    /// Creates an unpaid, unlabelled break between two times of day.
    pub fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            label: None,
            is_paid: false,
        }
    }

    /// Length of the planned break in whole minutes, zero if incomplete or inverted.
    pub fn duration_minutes(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.signed_duration_since(start).num_minutes().max(0),
            _ => 0,
        }
    }
}
