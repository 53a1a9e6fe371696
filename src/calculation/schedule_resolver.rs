//! Schedule resolution for (employee, date) pairs.
//!
//! At most one schedule is expected per employee per calendar date. When the
//! loaded rows violate that, the first row in input order wins.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::Schedule;

/// Finds the schedule for an employee on a calendar date.
///
/// # Arguments
///
/// * `schedules` - Candidate schedules, in the order they were loaded
/// * `employee_id` - The employee to match
/// * `date` - The date-only key to match
///
/// # Returns
///
/// The first schedule whose employee and date both match, or `None`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::resolve_schedule;
/// use timesheet_engine::models::Schedule;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let schedules = vec![
///     Schedule::new(1, 10, 100, 1000, date),
///     Schedule::new(2, 11, 100, 1000, date),
/// ];
///
/// assert_eq!(resolve_schedule(&schedules, 11, date).map(|s| s.id), Some(2));
/// assert!(resolve_schedule(&schedules, 12, date).is_none());
/// ```
pub fn resolve_schedule(schedules: &[Schedule], employee_id: i64, date: NaiveDate) -> Option<&Schedule> {
    schedules
        .iter()
        .find(|s| s.employee_id == employee_id && s.date == date)
}

/// A first-match lookup of schedules by (employee, date) for one batch.
#[derive(Debug, Default)]
pub struct ScheduleIndex<'a> {
    by_key: HashMap<(i64, NaiveDate), &'a Schedule>,
}

impl<'a> ScheduleIndex<'a> {
    /// Indexes the schedules, keeping the first row for each key.
    pub fn build(schedules: &'a [Schedule]) -> Self {
        let mut by_key = HashMap::with_capacity(schedules.len());
        for schedule in schedules {
            match by_key.entry((schedule.employee_id, schedule.date)) {
                Entry::Vacant(slot) => {
                    slot.insert(schedule);
                }
                Entry::Occupied(kept) => {
                    let kept = kept.get();
                    warn!(
                        employee_id = schedule.employee_id,
                        date = %schedule.date,
                        kept_schedule_id = kept.id,
                        ignored_schedule_id = schedule.id,
                        "Duplicate schedule for employee and date, keeping first"
                    );
                }
            }
        }
        Self { by_key }
    }

    /// Returns the schedule for an employee on a date.
    pub fn get(&self, employee_id: i64, date: NaiveDate) -> Option<&'a Schedule> {
        self.by_key.get(&(employee_id, date)).copied()
    }

    /// Number of distinct (employee, date) keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if no schedule was indexed.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
