//! Core data models for the timesheet engine.
//!
//! This module contains the time model (clock events, breaks, parsing
//! helpers), the attendance and planning entities, and the plain result
//! structures returned to callers.

mod clock_event;
mod date_range;
mod employee;
mod grace_policy;
mod reconciliation;
mod schedule;
mod time;
mod time_record;

pub use clock_event::{BREAK_SLOTS, BreakInterval, BreakSlots, ClockEvent, ScheduledBreak};
pub use date_range::DateRange;
pub use employee::Employee;
pub use grace_policy::{GraceThresholds, OutletGracePolicy};
pub use reconciliation::{
    BreakValues, ColorsByDate, FieldColors, GraceColor, Reconciliation, RecordValues, Totals,
    TimesheetTotals, ValuesByDate,
};
pub use schedule::Schedule;
pub use time::{
    date_key, is_midnight_sentinel, is_valid_instant, minutes_between, parse_calendar_date,
    parse_instant, parse_time_of_day,
};
pub use time_record::{IMAGE_SLOTS, TimeRecord};
