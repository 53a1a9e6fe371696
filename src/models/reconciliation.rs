//! Reconciliation result models.
//!
//! These are the plain, JSON-serializable structures handed to the
//! presentation layer: a values map and a parallel colors map, both keyed by
//! `yyyy-MM-dd` date string and then by employee id, plus the rollup totals.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock_event::ClockEvent;

/// Visual classification of a clock event against its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraceColor {
    /// Nothing to flag (on time, no schedule, or too early to be in tolerance).
    #[default]
    Transparent,
    /// Early, within the early grace.
    Blue,
    /// Late, within the slightly-late grace.
    Amber,
    /// Late beyond the slightly-late grace.
    Red,
}

/// Classifications for the four compared fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldColors {
    /// Clock-in vs scheduled start.
    pub clock_in_color: GraceColor,
    /// Clock-out vs scheduled end.
    pub clock_out_color: GraceColor,
    /// Break 1 start vs scheduled break 1 start.
    pub break_start_color: GraceColor,
    /// Break 1 end vs scheduled break 1 end.
    pub break_end_color: GraceColor,
}

impl FieldColors {
    /// All four fields transparent.
    pub fn transparent() -> Self {
        Self::default()
    }
}

/// A break as presented in the values map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakValues {
    /// 1-based break number.
    pub slot: u8,
    /// Break start, if captured.
    pub start: Option<NaiveDateTime>,
    /// Break end, if captured.
    pub end: Option<NaiveDateTime>,
    /// Display label.
    pub label: Option<String>,
    /// Whether the break is paid.
    pub is_paid: bool,
    /// Counted break length in minutes.
    pub minutes: i64,
}

/// Per-record values for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValues {
    /// The time record id.
    pub id: i64,
    /// The employee id.
    pub employee_id: i64,
    /// Set when the record's employee could not be found.
    pub employee_missing: bool,
    /// Clock-in event.
    pub clock_in: Option<ClockEvent>,
    /// Clock-out event.
    pub clock_out: Option<ClockEvent>,
    /// Filled break slots.
    pub breaks: Vec<BreakValues>,
    /// Worked hours.
    pub duration: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
    /// Evidence image 1.
    pub img1: Option<String>,
    /// Evidence image 2.
    pub img2: Option<String>,
    /// Evidence image 3.
    pub img3: Option<String>,
    /// Evidence image 4.
    pub img4: Option<String>,
    /// Evidence image 5.
    pub img5: Option<String>,
    /// Evidence image 6.
    pub img6: Option<String>,
    /// Evidence image 7.
    pub img7: Option<String>,
    /// Evidence image 8.
    pub img8: Option<String>,
}

/// Values keyed by date key, then employee id.
pub type ValuesByDate = BTreeMap<String, BTreeMap<i64, RecordValues>>;

/// Colors keyed by date key, then employee id.
pub type ColorsByDate = BTreeMap<String, BTreeMap<i64, FieldColors>>;

/// The output of one reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Values by date, then employee.
    pub values: ValuesByDate,
    /// Colors by date, then employee.
    pub colors: ColorsByDate,
    /// Records that could not be placed on a date.
    pub skipped_records: usize,
}

impl Reconciliation {
    /// Returns true if no record was placed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Summed hours and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Worked hours.
    pub duration: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
    /// Worked hours priced at each employee's hourly pay.
    pub cost: Decimal,
}

/// All rollups for a reconciled range.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimesheetTotals {
    /// Totals per date key.
    pub daily: BTreeMap<String, Totals>,
    /// Totals per employee id.
    pub employees: BTreeMap<i64, Totals>,
    /// Totals across the whole range.
    pub grand: Totals,
}
