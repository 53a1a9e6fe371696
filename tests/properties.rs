// Property-based tests for duration, overtime and grace classification.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use timesheet_engine::calculation::{calculate_record_hours, classify};
use timesheet_engine::config::EngineConfig;
use timesheet_engine::models::{BreakInterval, ClockEvent, GraceColor, GraceThresholds, TimeRecord};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn shift_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(6, 0, 0).unwrap())
}

/// A record clocked in at 06:00 and out `worked` minutes later, with one
/// break per `(offset, length)` pair placed inside the shift.
fn record_with(worked: i64, breaks: &[(i64, i64)]) -> TimeRecord {
    let start = shift_start();
    let mut record = TimeRecord::new(1, 10, 100, 1000);
    record.clock_in = Some(ClockEvent::at(start));
    record.clock_out = Some(ClockEvent::at(start + Duration::minutes(worked)));
    for (slot, (offset, length)) in record.breaks.iter_mut().zip(breaks) {
        let break_start = start + Duration::minutes(*offset);
        *slot = Some(BreakInterval::between(
            break_start,
            break_start + Duration::minutes(*length),
        ));
    }
    record
}

fn arb_breaks() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..600, 0i64..240), 0..=3)
}

/// `(worked, offset, length, extra)` with the lengthened break still ending
/// at or before clock-out.
fn arb_inside_break() -> impl Strategy<Value = (i64, i64, i64, i64)> {
    (2i64..720)
        .prop_flat_map(|worked| (Just(worked), 0..worked - 1))
        .prop_flat_map(|(worked, offset)| (Just(worked), Just(offset), 0..worked - offset - 1))
        .prop_flat_map(|(worked, offset, length)| {
            (
                Just(worked),
                Just(offset),
                Just(length),
                1..=worked - offset - length,
            )
        })
}

fn hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Without breaks, duration is the clock span in hours.
    #[test]
    fn duration_without_breaks_is_clock_span(worked in 0i64..1440) {
        let record = record_with(worked, &[]);
        let result = calculate_record_hours(&record, None, &EngineConfig::default());
        prop_assert_eq!(result.duration_hours, hours(worked));
    }

    /// Duration never goes negative, whatever the breaks.
    #[test]
    fn duration_is_never_negative(worked in 0i64..720, breaks in arb_breaks()) {
        let record = record_with(worked, &breaks);
        let result = calculate_record_hours(&record, None, &EngineConfig::default());
        prop_assert!(result.duration_hours >= Decimal::ZERO);
        prop_assert!(result.overtime_hours >= Decimal::ZERO);
    }

    /// Lengthening a break that lies inside the shift strictly shortens the
    /// worked duration.
    #[test]
    fn longer_inside_break_strictly_decreases_duration(
        (worked, offset, length, extra) in arb_inside_break(),
    ) {
        let config = EngineConfig::default();
        let shorter = record_with(worked, &[(offset, length)]);
        let longer = record_with(worked, &[(offset, length + extra)]);

        let before = calculate_record_hours(&shorter, None, &config);
        let after = calculate_record_hours(&longer, None, &config);

        prop_assert!(
            after.duration_hours < before.duration_hours,
            "{} -> {} after lengthening by {} minutes",
            before.duration_hours,
            after.duration_hours,
            extra
        );
    }

    /// With no schedule, overtime is whatever exceeds the standard day.
    #[test]
    fn unscheduled_overtime_is_excess_over_standard_day(worked in 0i64..1440) {
        let config = EngineConfig::default();
        let result = calculate_record_hours(&record_with(worked, &[]), None, &config);

        let expected = (result.duration_hours - config.standard_day_hours).max(Decimal::ZERO);
        prop_assert_eq!(result.overtime_hours, expected);
    }
}

// ---------------------------------------------------------------------------
// Grace classification
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Every signed offset lands in exactly the band its thresholds describe.
    #[test]
    fn grace_bands_partition_offsets(
        offset in -120i64..120,
        early in 0u32..30,
        slightly_late in 0u32..30,
    ) {
        let grace = GraceThresholds::new(early, slightly_late, slightly_late + 5);
        let scheduled = shift_start();
        let actual = scheduled + Duration::minutes(offset);

        let expected = if offset == 0 {
            GraceColor::Transparent
        } else if offset < 0 && offset.unsigned_abs() <= u64::from(early) {
            GraceColor::Blue
        } else if offset < 0 {
            GraceColor::Transparent
        } else if offset <= i64::from(slightly_late) {
            GraceColor::Amber
        } else {
            GraceColor::Red
        };

        prop_assert_eq!(classify(Some(actual), Some(scheduled), &grace), expected);
    }

    /// A missing side is never flagged.
    #[test]
    fn missing_side_is_transparent(offset in -120i64..120) {
        let grace = GraceThresholds::new(5, 10, 15);
        let instant = shift_start() + Duration::minutes(offset);

        prop_assert_eq!(classify(Some(instant), None, &grace), GraceColor::Transparent);
        prop_assert_eq!(classify(None, Some(instant), &grace), GraceColor::Transparent);
    }
}
