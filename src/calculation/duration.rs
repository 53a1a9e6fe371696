//! Worked-hours and overtime calculation for a single time record.
//!
//! Worked time is the span between clock-in and clock-out less every complete
//! break on the record. Overtime is worked time beyond the matched schedule's
//! planned hours, or beyond the standard day when no schedule is usable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakInterval, Schedule, ScheduledBreak, TimeRecord, minutes_between};

use super::rounding::{minutes_to_hours, round_to};

/// Worked and overtime hours for one record, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHours {
    /// Hours worked, net of breaks.
    pub duration_hours: Decimal,
    /// Hours worked beyond the baseline.
    pub overtime_hours: Decimal,
}

impl RecordHours {
    /// The safe default: whatever duration was last persisted, no overtime.
    pub fn stored(record: &TimeRecord) -> Self {
        Self {
            duration_hours: record.stored_duration.unwrap_or(Decimal::ZERO),
            overtime_hours: Decimal::ZERO,
        }
    }
}

/// Minutes worked between clock-in and clock-out, net of complete breaks.
///
/// Returns `Ok(None)` when either endpoint is missing. An inverted pair is
/// measured by its absolute span, and breaks longer than the span floor the
/// result at zero.
pub fn worked_minutes(record: &TimeRecord) -> EngineResult<Option<i64>> {
    let (Some(clock_in), Some(clock_out)) = (record.clock_in_at(), record.clock_out_at()) else {
        return Ok(None);
    };

    let span = minutes_between(clock_in, clock_out);
    let total = span.checked_abs().ok_or_else(|| EngineError::CalculationError {
        message: format!("clock span of {} minutes cannot be measured", span),
    })?;
    if span < 0 {
        warn!(
            record_id = record.id,
            clock_in = %clock_in,
            clock_out = %clock_out,
            "Clock-out precedes clock-in, using absolute span"
        );
    }

    let break_minutes: i64 = record
        .filled_breaks()
        .filter(|b| b.is_complete())
        .map(BreakInterval::duration_minutes)
        .sum();

    Ok(Some(total.saturating_sub(break_minutes).max(0)))
}

/// Planned hours for a schedule, net of its first break only.
///
/// Open shifts report their authored duration. Returns `Ok(None)` when the
/// schedule lacks a start or end time.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::scheduled_hours;
/// use timesheet_engine::models::{Schedule, ScheduledBreak};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let mut schedule = Schedule::new(1, 10, 100, 1000, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
/// schedule.start_time = Some(time(9));
/// schedule.end_time = Some(time(18));
/// schedule.breaks[0] = Some(ScheduledBreak::between(time(12), time(13)));
///
/// assert_eq!(scheduled_hours(&schedule, 2).unwrap(), Some(Decimal::new(8, 0)));
/// ```
pub fn scheduled_hours(schedule: &Schedule, places: u32) -> EngineResult<Option<Decimal>> {
    if schedule.is_open() {
        return Ok(Some(schedule.duration));
    }

    let Some((start, end)) = schedule.planned_span() else {
        return Ok(None);
    };

    let break_minutes = schedule
        .first_break()
        .map(ScheduledBreak::duration_minutes)
        .unwrap_or(0);
    let minutes = (minutes_between(start, end) - break_minutes).max(0);

    minutes_to_hours(minutes, places).map(Some)
}

/// Hours a record may work before overtime starts.
pub fn overtime_baseline(schedule: Option<&Schedule>, config: &EngineConfig) -> EngineResult<Decimal> {
    let planned = match schedule {
        Some(schedule) => scheduled_hours(schedule, config.rounding_places)?,
        None => None,
    };
    Ok(planned.unwrap_or(config.standard_day_hours))
}

/// Computes worked and overtime hours for one record.
///
/// Never fails: a record without both clock endpoints, or one whose
/// arithmetic fails, gets [`RecordHours::stored`].
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::calculate_record_hours;
/// use timesheet_engine::config::EngineConfig;
/// use timesheet_engine::models::{ClockEvent, TimeRecord, parse_instant};
/// use rust_decimal::Decimal;
///
/// let mut record = TimeRecord::new(1, 10, 100, 1000);
/// record.clock_in = Some(ClockEvent::at(parse_instant("2024-01-05T09:00:00Z").unwrap()));
/// record.clock_out = Some(ClockEvent::at(parse_instant("2024-01-05T17:30:00Z").unwrap()));
///
/// let hours = calculate_record_hours(&record, None, &EngineConfig::default());
/// assert_eq!(hours.duration_hours, Decimal::new(850, 2));
/// assert_eq!(hours.overtime_hours, Decimal::new(50, 2));
/// ```
pub fn calculate_record_hours(
    record: &TimeRecord,
    schedule: Option<&Schedule>,
    config: &EngineConfig,
) -> RecordHours {
    match try_calculate_record_hours(record, schedule, config) {
        Ok(Some(hours)) => hours,
        Ok(None) => {
            debug!(
                record_id = record.id,
                "Clock-in or clock-out missing, keeping stored duration"
            );
            RecordHours::stored(record)
        }
        Err(err) => {
            warn!(
                record_id = record.id,
                employee_id = record.employee_id,
                error = %err,
                "Duration calculation failed, keeping stored duration"
            );
            RecordHours::stored(record)
        }
    }
}

fn try_calculate_record_hours(
    record: &TimeRecord,
    schedule: Option<&Schedule>,
    config: &EngineConfig,
) -> EngineResult<Option<RecordHours>> {
    let Some(minutes) = worked_minutes(record)? else {
        return Ok(None);
    };

    let duration_hours = minutes_to_hours(minutes, config.rounding_places)?;
    let baseline = overtime_baseline(schedule, config)?;
    let excess = duration_hours
        .checked_sub(baseline)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "overtime of {} hours against baseline {} overflows",
                duration_hours, baseline
            ),
        })?;

    Ok(Some(RecordHours {
        duration_hours,
        overtime_hours: round_to(excess.max(Decimal::ZERO), config.rounding_places),
    }))
}
