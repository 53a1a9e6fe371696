//! Storage-row boundary types.
//!
//! Rows mirror the relational columns: one column per break end
//! (`break1_start` .. `break3_end`), one per evidence image (`img1` .. `img8`)
//! and timestamps as strings. Converting a row into a domain type maps the
//! break columns onto the fixed slot array. Unparseable timestamps become
//! absent values with a warning instead of failing the row.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BreakInterval, ClockEvent, GraceThresholds, OutletGracePolicy, Schedule, ScheduledBreak,
    TimeRecord, parse_calendar_date, parse_instant, parse_time_of_day,
};

/// Treats blank strings as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn lenient_instant(row_id: i64, column: &str, value: Option<&str>) -> Option<NaiveDateTime> {
    let raw = present(value)?;
    match parse_instant(raw) {
        Ok(instant) => Some(instant),
        Err(err) => {
            warn!(record_id = row_id, column, error = %err, "Dropping unparseable timestamp");
            None
        }
    }
}

fn lenient_time(row_id: i64, column: &str, value: Option<&str>) -> Option<NaiveTime> {
    let raw = present(value)?;
    match parse_time_of_day(raw) {
        Ok(time) => Some(time),
        Err(err) => {
            warn!(schedule_id = row_id, column, error = %err, "Dropping unparseable time of day");
            None
        }
    }
}

/// A `time_records` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TimeRecordRow {
    pub id: i64,
    pub employee_id: i64,
    pub outlet_id: i64,
    pub company_id: i64,
    pub device_id: Option<i64>,
    pub date: Option<String>,
    pub clock_in: Option<String>,
    pub clock_in_note: Option<String>,
    pub clock_in_image: Option<String>,
    pub clock_out: Option<String>,
    pub clock_out_note: Option<String>,
    pub clock_out_image: Option<String>,
    pub break1_start: Option<String>,
    pub break1_end: Option<String>,
    pub break1_label: Option<String>,
    pub break1_paid: Option<bool>,
    pub break2_start: Option<String>,
    pub break2_end: Option<String>,
    pub break2_label: Option<String>,
    pub break2_paid: Option<bool>,
    pub break3_start: Option<String>,
    pub break3_end: Option<String>,
    pub break3_label: Option<String>,
    pub break3_paid: Option<bool>,
    pub duration: Option<Decimal>,
    pub img1: Option<String>,
    pub img2: Option<String>,
    pub img3: Option<String>,
    pub img4: Option<String>,
    pub img5: Option<String>,
    pub img6: Option<String>,
    pub img7: Option<String>,
    pub img8: Option<String>,
}

impl TimeRecordRow {
    fn clock_event(
        &self,
        column: &str,
        instant: Option<&str>,
        note: &Option<String>,
        image: &Option<String>,
    ) -> Option<ClockEvent> {
        lenient_instant(self.id, column, instant).map(|instant| ClockEvent {
            instant,
            note: note.clone(),
            image: image.clone(),
        })
    }

    fn break_slot(
        &self,
        slot: usize,
        start: Option<&str>,
        end: Option<&str>,
        label: &Option<String>,
        paid: Option<bool>,
    ) -> Option<BreakInterval> {
        let start = lenient_instant(self.id, &format!("break{}_start", slot), start);
        let end = lenient_instant(self.id, &format!("break{}_end", slot), end);
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(BreakInterval {
            start: start.map(ClockEvent::at),
            end: end.map(ClockEvent::at),
            label: label.clone(),
            is_paid: paid.unwrap_or(false),
        })
    }

    /// Converts the row into a [`TimeRecord`]. Never fails.
    pub fn into_record(self) -> TimeRecord {
        let date = present(self.date.as_deref()).and_then(|raw| match parse_calendar_date(raw) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(record_id = self.id, error = %err, "Dropping unparseable record date");
                None
            }
        });

        let clock_in = self.clock_event(
            "clock_in",
            self.clock_in.as_deref(),
            &self.clock_in_note,
            &self.clock_in_image,
        );
        let clock_out = self.clock_event(
            "clock_out",
            self.clock_out.as_deref(),
            &self.clock_out_note,
            &self.clock_out_image,
        );
        let breaks = [
            self.break_slot(
                1,
                self.break1_start.as_deref(),
                self.break1_end.as_deref(),
                &self.break1_label,
                self.break1_paid,
            ),
            self.break_slot(
                2,
                self.break2_start.as_deref(),
                self.break2_end.as_deref(),
                &self.break2_label,
                self.break2_paid,
            ),
            self.break_slot(
                3,
                self.break3_start.as_deref(),
                self.break3_end.as_deref(),
                &self.break3_label,
                self.break3_paid,
            ),
        ];

        TimeRecord {
            id: self.id,
            employee_id: self.employee_id,
            outlet_id: self.outlet_id,
            company_id: self.company_id,
            device_id: self.device_id,
            date,
            clock_in,
            clock_out,
            breaks,
            stored_duration: self.duration,
            images: [
                self.img1, self.img2, self.img3, self.img4, self.img5, self.img6, self.img7,
                self.img8,
            ],
        }
    }
}

/// A `schedules` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ScheduleRow {
    pub id: i64,
    pub employee_id: i64,
    pub outlet_id: i64,
    pub company_id: i64,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<Decimal>,
    pub shift_rate: Option<Decimal>,
    pub overtime_rate: Option<Decimal>,
    pub is_open_shift: Option<bool>,
    pub break1_start: Option<String>,
    pub break1_end: Option<String>,
    pub break1_label: Option<String>,
    pub break1_paid: Option<bool>,
    pub break2_start: Option<String>,
    pub break2_end: Option<String>,
    pub break2_label: Option<String>,
    pub break2_paid: Option<bool>,
    pub break3_start: Option<String>,
    pub break3_end: Option<String>,
    pub break3_label: Option<String>,
    pub break3_paid: Option<bool>,
    pub color: Option<String>,
}

impl ScheduleRow {
    fn break_slot(
        &self,
        slot: usize,
        start: Option<&str>,
        end: Option<&str>,
        label: &Option<String>,
        paid: Option<bool>,
    ) -> Option<ScheduledBreak> {
        let start = lenient_time(self.id, &format!("break{}_start", slot), start);
        let end = lenient_time(self.id, &format!("break{}_end", slot), end);
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(ScheduledBreak {
            start,
            end,
            label: label.clone(),
            is_paid: paid.unwrap_or(false),
        })
    }

    /// Converts the row into a [`Schedule`].
    ///
    /// The date is required since it keys the schedule; an unparseable date
    /// returns `InvalidDate`. Missing duration and overtime rate take the
    /// configured defaults.
    pub fn into_schedule(self, config: &EngineConfig) -> EngineResult<Schedule> {
        let date = parse_calendar_date(&self.date).map_err(|source| EngineError::InvalidDate {
            field: "date".to_string(),
            source,
        })?;

        let breaks = [
            self.break_slot(
                1,
                self.break1_start.as_deref(),
                self.break1_end.as_deref(),
                &self.break1_label,
                self.break1_paid,
            ),
            self.break_slot(
                2,
                self.break2_start.as_deref(),
                self.break2_end.as_deref(),
                &self.break2_label,
                self.break2_paid,
            ),
            self.break_slot(
                3,
                self.break3_start.as_deref(),
                self.break3_end.as_deref(),
                &self.break3_label,
                self.break3_paid,
            ),
        ];

        Ok(Schedule {
            id: self.id,
            employee_id: self.employee_id,
            outlet_id: self.outlet_id,
            company_id: self.company_id,
            date,
            start_time: lenient_time(self.id, "start_time", self.start_time.as_deref()),
            end_time: lenient_time(self.id, "end_time", self.end_time.as_deref()),
            duration: self.duration.unwrap_or(config.default_schedule_hours),
            shift_rate: self.shift_rate,
            overtime_rate: self.overtime_rate.unwrap_or(config.default_overtime_rate),
            is_open_shift: self.is_open_shift.unwrap_or(false),
            breaks,
            color: self.color,
        })
    }
}

/// An `outlets` grace-policy row with nullable minute columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct OutletGracePolicyRow {
    pub outlet_id: i64,
    pub company_id: i64,
    pub early_clock_in_grace: Option<i64>,
    pub slightly_late_clock_in_grace: Option<i64>,
    pub late_clock_in_grace: Option<i64>,
    pub early_clock_out_grace: Option<i64>,
    pub slightly_late_clock_out_grace: Option<i64>,
    pub late_clock_out_grace: Option<i64>,
}

/// Null or negative minutes become zero.
fn minutes(value: Option<i64>) -> u32 {
    value
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

impl OutletGracePolicyRow {
    /// Converts the row into an [`OutletGracePolicy`].
    pub fn into_policy(self) -> OutletGracePolicy {
        OutletGracePolicy {
            outlet_id: self.outlet_id,
            company_id: self.company_id,
            clock_in: GraceThresholds::new(
                minutes(self.early_clock_in_grace),
                minutes(self.slightly_late_clock_in_grace),
                minutes(self.late_clock_in_grace),
            ),
            clock_out: GraceThresholds::new(
                minutes(self.early_clock_out_grace),
                minutes(self.slightly_late_clock_out_grace),
                minutes(self.late_clock_out_grace),
            ),
        }
    }
}
