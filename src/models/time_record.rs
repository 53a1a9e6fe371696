//! Time record model.
//!
//! A [`TimeRecord`] is one employee's actual attendance for one shift
//! occurrence, built up incrementally as clock events arrive from a device or
//! manual entry.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock_event::{BreakInterval, BreakSlots, ClockEvent};

/// Number of evidence-image slots on a time record.
pub const IMAGE_SLOTS: usize = 8;

/// One employee's recorded attendance for one shift occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Unique identifier for the record.
    pub id: i64,
    /// The employee the attendance belongs to.
    pub employee_id: i64,
    /// The outlet the attendance was captured at.
    pub outlet_id: i64,
    /// The company owning the outlet.
    pub company_id: i64,
    /// The capturing device, if any.
    #[serde(default)]
    pub device_id: Option<i64>,
    /// Calendar day the record is filed under.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Clock-in event.
    #[serde(default)]
    pub clock_in: Option<ClockEvent>,
    /// Clock-out event.
    #[serde(default)]
    pub clock_out: Option<ClockEvent>,
    /// Break slots (index 0 is break 1).
    #[serde(default)]
    pub breaks: BreakSlots<BreakInterval>,
    /// Previously persisted duration in hours; may be stale or absent.
    #[serde(default)]
    pub stored_duration: Option<Decimal>,
    /// Evidence-image references (index 0 is img1).
    #[serde(default)]
    pub images: [Option<String>; IMAGE_SLOTS],
}

impl TimeRecord {
    /// Creates an empty record for an employee at an outlet.
    pub fn new(id: i64, employee_id: i64, outlet_id: i64, company_id: i64) -> Self {
        Self {
            id,
            employee_id,
            outlet_id,
            company_id,
            device_id: None,
            date: None,
            clock_in: None,
            clock_out: None,
            breaks: Default::default(),
            stored_duration: None,
            images: Default::default(),
        }
    }

    /// Returns the calendar day used to key this record.
    ///
    /// The explicit `date` wins; otherwise the clock-in's calendar date is
    /// used. `None` means the record cannot be placed on any day.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.date
            .or_else(|| self.clock_in.as_ref().map(ClockEvent::date))
    }

    /// Clock-in instant, if captured.
    pub fn clock_in_at(&self) -> Option<NaiveDateTime> {
        self.clock_in.as_ref().map(|event| event.instant)
    }

    /// Clock-out instant, if captured.
    pub fn clock_out_at(&self) -> Option<NaiveDateTime> {
        self.clock_out.as_ref().map(|event| event.instant)
    }

    /// The first break slot, compared against the schedule's break 1.
    pub fn first_break(&self) -> Option<&BreakInterval> {
        self.breaks[0].as_ref()
    }

    /// Iterates over the filled break slots.
    pub fn filled_breaks(&self) -> impl Iterator<Item = &BreakInterval> {
        self.breaks.iter().flatten()
    }
}
