//! Schedule model.
//!
//! A [`Schedule`] is one employee's planned shift for one calendar date at one
//! outlet. Open shifts store `00:00:00` for both start and end as a
//! placeholder and carry an explicitly authored duration instead.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock_event::{BreakSlots, ScheduledBreak};
use super::time::is_midnight_sentinel;
use crate::config::{DEFAULT_OVERTIME_RATE, DEFAULT_SCHEDULE_HOURS};

fn default_duration() -> Decimal {
    DEFAULT_SCHEDULE_HOURS
}

fn default_overtime_rate() -> Decimal {
    DEFAULT_OVERTIME_RATE
}

/// One employee's planned shift for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier for the schedule.
    pub id: i64,
    /// The employee the shift is planned for.
    pub employee_id: i64,
    /// The outlet the shift is planned at.
    pub outlet_id: i64,
    /// The company owning the outlet.
    pub company_id: i64,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Planned start time of day.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Planned end time of day.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Authored duration in hours.
    #[serde(default = "default_duration")]
    pub duration: Decimal,
    /// Hourly shift rate, if set.
    #[serde(default)]
    pub shift_rate: Option<Decimal>,
    /// Overtime rate multiplier.
    #[serde(default = "default_overtime_rate")]
    pub overtime_rate: Decimal,
    /// Whether this is an open shift with placeholder times.
    #[serde(default)]
    pub is_open_shift: bool,
    /// Planned break slots (index 0 is break 1).
    #[serde(default)]
    pub breaks: BreakSlots<ScheduledBreak>,
    /// Calendar color tag.
    #[serde(default)]
    pub color: Option<String>,
}

impl Schedule {
    /// Creates a schedule with the default duration and overtime rate.
    pub fn new(id: i64, employee_id: i64, outlet_id: i64, company_id: i64, date: NaiveDate) -> Self {
        Self {
            id,
            employee_id,
            outlet_id,
            company_id,
            date,
            start_time: None,
            end_time: None,
            duration: DEFAULT_SCHEDULE_HOURS,
            shift_rate: None,
            overtime_rate: DEFAULT_OVERTIME_RATE,
            is_open_shift: false,
            breaks: Default::default(),
            color: None,
        }
    }

    /// Returns true for open shifts, flagged or detected by the midnight placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::Schedule;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let mut schedule = Schedule::new(1, 10, 100, 1000, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    /// schedule.start_time = Some(NaiveTime::MIN);
    /// schedule.end_time = Some(NaiveTime::MIN);
    /// assert!(schedule.is_open());
    /// ```
    pub fn is_open(&self) -> bool {
        if self.is_open_shift {
            return true;
        }
        matches!(
            (self.start_time, self.end_time),
            (Some(start), Some(end)) if is_midnight_sentinel(start) && is_midnight_sentinel(end)
        )
    }

    /// The first planned break, used for overtime baselines and break coloring.
    pub fn first_break(&self) -> Option<&ScheduledBreak> {
        self.breaks[0].as_ref()
    }

    /// Planned start and end as instants on the schedule's date.
    ///
    /// An end earlier than the start is placed on the following day. Returns
    /// `None` when either time is missing or the shift is open.
    pub fn planned_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if self.is_open() {
            return None;
        }
        let start = self.date.and_time(self.start_time?);
        let mut end = self.date.and_time(self.end_time?);
        if end < start {
            end = end.checked_add_signed(Duration::days(1))?;
        }
        Some((start, end))
    }
}
