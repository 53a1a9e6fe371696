//! Grace-period classification of clock events.
//!
//! Each compared field is classified by its signed offset from the scheduled
//! time of day on the actual event's calendar date:
//!
//! | Offset (actual − scheduled)        | Color         |
//! |------------------------------------|---------------|
//! | early, within `early` minutes      | `blue`        |
//! | late, within `slightly_late`       | `amber`       |
//! | late, beyond `slightly_late`       | `red`         |
//! | on time, or early beyond `early`   | `transparent` |
//!
//! Clock-in and break-start use the outlet's clock-in thresholds; clock-out
//! and break-end use its clock-out thresholds.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::{
    FieldColors, GraceColor, GraceThresholds, OutletGracePolicy, Schedule, TimeRecord,
    minutes_between,
};

/// Classifies one actual instant against its scheduled instant.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::classify;
/// use timesheet_engine::models::{GraceColor, GraceThresholds, parse_instant};
///
/// let grace = GraceThresholds::new(5, 10, 15);
/// let scheduled = parse_instant("2024-01-05T09:00:00").unwrap();
/// let actual = parse_instant("2024-01-05T09:12:00").unwrap();
///
/// assert_eq!(classify(Some(actual), Some(scheduled), &grace), GraceColor::Red);
/// assert_eq!(classify(None, Some(scheduled), &grace), GraceColor::Transparent);
/// ```
pub fn classify(
    actual: Option<NaiveDateTime>,
    scheduled: Option<NaiveDateTime>,
    grace: &GraceThresholds,
) -> GraceColor {
    let (Some(actual), Some(scheduled)) = (actual, scheduled) else {
        return GraceColor::Transparent;
    };

    let diff = minutes_between(scheduled, actual);
    if diff < 0 {
        if diff.unsigned_abs() <= u64::from(grace.early) {
            GraceColor::Blue
        } else {
            GraceColor::Transparent
        }
    } else if diff > 0 {
        if diff <= i64::from(grace.slightly_late) {
            GraceColor::Amber
        } else {
            GraceColor::Red
        }
    } else {
        GraceColor::Transparent
    }
}

/// Places a scheduled time of day on the calendar date of the actual event.
fn scheduled_on_same_date(
    actual: Option<NaiveDateTime>,
    time: Option<NaiveTime>,
) -> Option<NaiveDateTime> {
    Some(actual?.date().and_time(time?))
}

fn classify_field(
    actual: Option<NaiveDateTime>,
    scheduled_time: Option<NaiveTime>,
    grace: &GraceThresholds,
) -> GraceColor {
    classify(actual, scheduled_on_same_date(actual, scheduled_time), grace)
}

/// Classifies the four compared fields of a record against its schedule.
///
/// Without a schedule, or against an open shift whose times are
/// placeholders, every field is transparent.
pub fn classify_record(
    record: &TimeRecord,
    schedule: Option<&Schedule>,
    policy: &OutletGracePolicy,
) -> FieldColors {
    let Some(schedule) = schedule else {
        return FieldColors::transparent();
    };
    if schedule.is_open() {
        return FieldColors::transparent();
    }

    let actual_break = record.first_break();
    let planned_break = schedule.first_break();

    FieldColors {
        clock_in_color: classify_field(record.clock_in_at(), schedule.start_time, &policy.clock_in),
        clock_out_color: classify_field(
            record.clock_out_at(),
            schedule.end_time,
            &policy.clock_out,
        ),
        break_start_color: classify_field(
            actual_break.and_then(|b| b.start.as_ref()).map(|e| e.instant),
            planned_break.and_then(|b| b.start),
            &policy.clock_in,
        ),
        break_end_color: classify_field(
            actual_break.and_then(|b| b.end.as_ref()).map(|e| e.instant),
            planned_break.and_then(|b| b.end),
            &policy.clock_out,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreakInterval, ClockEvent, ScheduledBreak};
    use chrono::NaiveDate;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_time(time_str: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time_str, "%H:%M:%S").unwrap()
    }

    fn at(time_str: &str) -> Option<NaiveDateTime> {
        Some(make_datetime("2024-01-05", time_str))
    }

    fn grace() -> GraceThresholds {
        GraceThresholds::new(5, 10, 15)
    }

    fn policy() -> OutletGracePolicy {
        OutletGracePolicy {
            outlet_id: 100,
            company_id: 1000,
            clock_in: grace(),
            clock_out: GraceThresholds::new(2, 3, 4),
        }
    }

    fn schedule() -> Schedule {
        let mut schedule = Schedule::new(1, 10, 100, 1000, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        schedule.start_time = Some(make_time("09:00:00"));
        schedule.end_time = Some(make_time("17:00:00"));
        schedule.breaks[0] = Some(ScheduledBreak::between(
            make_time("12:00:00"),
            make_time("12:30:00"),
        ));
        schedule
    }

    fn record(clock_in: &str, clock_out: &str) -> TimeRecord {
        let mut record = TimeRecord::new(1, 10, 100, 1000);
        record.clock_in = Some(ClockEvent::at(make_datetime("2024-01-05", clock_in)));
        record.clock_out = Some(ClockEvent::at(make_datetime("2024-01-05", clock_out)));
        record
    }

    // ==========================================================================
    // GC-001: the five bands with early=5, slightly_late=10
    // ==========================================================================
    #[test]
    fn test_gc_001_classification_bands() {
        let scheduled = at("09:00:00");
        assert_eq!(classify(at("08:56:00"), scheduled, &grace()), GraceColor::Blue);
        assert_eq!(classify(at("09:00:00"), scheduled, &grace()), GraceColor::Transparent);
        assert_eq!(classify(at("09:07:00"), scheduled, &grace()), GraceColor::Amber);
        assert_eq!(classify(at("09:15:00"), scheduled, &grace()), GraceColor::Red);
        assert_eq!(classify(at("08:54:00"), scheduled, &grace()), GraceColor::Transparent);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let scheduled = at("09:00:00");
        assert_eq!(classify(at("08:55:00"), scheduled, &grace()), GraceColor::Blue);
        assert_eq!(classify(at("09:10:00"), scheduled, &grace()), GraceColor::Amber);
        assert_eq!(classify(at("09:11:00"), scheduled, &grace()), GraceColor::Red);
    }

    #[test]
    fn test_zero_thresholds() {
        let zero = GraceThresholds::default();
        let scheduled = at("09:00:00");
        assert_eq!(classify(at("08:59:00"), scheduled, &zero), GraceColor::Transparent);
        assert_eq!(classify(at("09:01:00"), scheduled, &zero), GraceColor::Red);
    }

    #[test]
    fn test_missing_instant_is_transparent() {
        assert_eq!(classify(None, at("09:00:00"), &grace()), GraceColor::Transparent);
        assert_eq!(classify(at("09:30:00"), None, &grace()), GraceColor::Transparent);
    }

    // ==========================================================================
    // GC-002: 09:12 against 09:00 with slightly_late=10 is red
    // ==========================================================================
    #[test]
    fn test_gc_002_twelve_minutes_late_is_red() {
        let colors = classify_record(&record("09:12:00", "17:00:00"), Some(&schedule()), &policy());
        assert_eq!(colors.clock_in_color, GraceColor::Red);
        assert_eq!(colors.clock_out_color, GraceColor::Transparent);
    }

    // ==========================================================================
    // GC-003: break fields use the matching threshold family
    // ==========================================================================
    #[test]
    fn test_gc_003_break_fields_use_threshold_families() {
        let mut record = record("09:00:00", "17:00:00");
        record.breaks[0] = Some(BreakInterval::between(
            make_datetime("2024-01-05", "12:04:00"),
            make_datetime("2024-01-05", "12:34:00"),
        ));

        let colors = classify_record(&record, Some(&schedule()), &policy());
        // 4 late against clock-in slightly_late=10
        assert_eq!(colors.break_start_color, GraceColor::Amber);
        // 4 late against clock-out slightly_late=3
        assert_eq!(colors.break_end_color, GraceColor::Red);
    }

    #[test]
    fn test_clock_out_early_within_grace_is_blue() {
        let colors = classify_record(&record("09:00:00", "16:58:00"), Some(&schedule()), &policy());
        assert_eq!(colors.clock_out_color, GraceColor::Blue);
    }

    #[test]
    fn test_missing_break_is_transparent() {
        let colors = classify_record(&record("09:00:00", "17:00:00"), Some(&schedule()), &policy());
        assert_eq!(colors.break_start_color, GraceColor::Transparent);
        assert_eq!(colors.break_end_color, GraceColor::Transparent);
    }

    // ==========================================================================
    // GC-004: no schedule or an open shift colors nothing
    // ==========================================================================
    #[test]
    fn test_gc_004_no_schedule_all_transparent() {
        let colors = classify_record(&record("10:30:00", "19:00:00"), None, &policy());
        assert_eq!(colors, FieldColors::transparent());
    }

    #[test]
    fn test_open_shift_all_transparent() {
        let mut open = schedule();
        open.is_open_shift = true;
        let colors = classify_record(&record("10:30:00", "19:00:00"), Some(&open), &policy());
        assert_eq!(colors, FieldColors::transparent());
    }

    #[test]
    fn test_scheduled_time_uses_actual_calendar_date() {
        let mut night = schedule();
        night.start_time = Some(make_time("22:00:00"));
        night.end_time = Some(make_time("06:00:00"));

        let mut record = TimeRecord::new(1, 10, 100, 1000);
        record.clock_in = Some(ClockEvent::at(make_datetime("2024-01-05", "22:00:00")));
        record.clock_out = Some(ClockEvent::at(make_datetime("2024-01-06", "06:02:00")));

        let colors = classify_record(&record, Some(&night), &policy());
        assert_eq!(colors.clock_in_color, GraceColor::Transparent);
        assert_eq!(colors.clock_out_color, GraceColor::Amber);
    }
}
