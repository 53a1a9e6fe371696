//! Timesheet rollups over reconciled values.
//!
//! Totals sum worked hours, overtime and cost (worked hours priced at the
//! employee's hourly pay) over the values of a filtered employee set. Each
//! total is summed raw and rounded once.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Employee, RecordValues, TimesheetTotals, Totals, ValuesByDate};

use super::rounding::round_to;

/// Selects the employees included in rollups.
///
/// An empty filter selects every active employee. Inactive employees are
/// only counted when `active_only` is explicitly turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeFilter {
    /// Only include active employees. Defaults to true.
    pub active_only: bool,
    /// Case-insensitive substring of the employee's full name.
    pub search: Option<String>,
    /// Only include employees in this section.
    pub section_id: Option<i64>,
    /// Only include employees whose home outlet is this one.
    pub outlet_id: Option<i64>,
}

impl Default for EmployeeFilter {
    fn default() -> Self {
        Self {
            active_only: true,
            search: None,
            section_id: None,
            outlet_id: None,
        }
    }
}

impl EmployeeFilter {
    /// Returns true if the employee passes every set criterion.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::calculation::EmployeeFilter;
    /// use timesheet_engine::models::Employee;
    ///
    /// let filter = EmployeeFilter {
    ///     search: Some("love".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(filter.matches(&Employee::new(1, 1, "Ada", "Lovelace")));
    /// assert!(!filter.matches(&Employee::new(2, 1, "Alan", "Turing")));
    /// ```
    pub fn matches(&self, employee: &Employee) -> bool {
        if self.active_only && !employee.active {
            return false;
        }
        if self.section_id.is_some() && employee.section_id != self.section_id {
            return false;
        }
        if self.outlet_id.is_some() && employee.outlet_id != self.outlet_id {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => employee
                .full_name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    duration: Decimal,
    overtime: Decimal,
    cost: Decimal,
}

impl Accumulator {
    /// Adds one record, or leaves the sums untouched if any of them would
    /// overflow.
    fn add(&mut self, values: &RecordValues, employee: &Employee) {
        let sums = employee.cost_for(values.duration).and_then(|cost| {
            Some((
                self.duration.checked_add(values.duration)?,
                self.overtime.checked_add(values.overtime)?,
                self.cost.checked_add(cost)?,
            ))
        });

        match sums {
            Some((duration, overtime, cost)) => {
                self.duration = duration;
                self.overtime = overtime;
                self.cost = cost;
            }
            None => warn!(
                record_id = values.id,
                employee_id = values.employee_id,
                duration = %values.duration,
                "Rollup overflow, leaving record out of total"
            ),
        }
    }

    fn finish(self, places: u32) -> Totals {
        Totals {
            duration: round_to(self.duration, places),
            overtime: round_to(self.overtime, places),
            cost: round_to(self.cost, places),
        }
    }
}

/// Rollups over one reconciled values map and a filtered employee set.
///
/// Values whose employee is unknown or filtered out are not counted.
#[derive(Debug)]
pub struct Rollup<'a> {
    values: &'a ValuesByDate,
    employees: HashMap<i64, &'a Employee>,
    places: u32,
}

impl<'a> Rollup<'a> {
    /// Prepares rollups for the employees that pass `filter`.
    pub fn new(
        values: &'a ValuesByDate,
        employees: &'a [Employee],
        filter: &EmployeeFilter,
        places: u32,
    ) -> Self {
        Self {
            values,
            employees: employees
                .iter()
                .filter(|e| filter.matches(e))
                .map(|e| (e.id, e))
                .collect(),
            places,
        }
    }

    fn counted(&self) -> impl Iterator<Item = (&'a str, &'a RecordValues, &'a Employee)> + '_ {
        self.values.iter().flat_map(move |(day, by_employee)| {
            by_employee.iter().filter_map(move |(employee_id, values)| {
                self.employees
                    .get(employee_id)
                    .map(|employee| (day.as_str(), values, *employee))
            })
        })
    }

    /// Totals for one `yyyy-MM-dd` date key.
    pub fn daily_total(&self, day: &str) -> Totals {
        let mut acc = Accumulator::default();
        for (_, values, employee) in self.counted().filter(|(d, _, _)| *d == day) {
            acc.add(values, employee);
        }
        acc.finish(self.places)
    }

    /// Totals for one employee across the range.
    pub fn employee_total(&self, employee_id: i64) -> Totals {
        let mut acc = Accumulator::default();
        for (_, values, employee) in self.counted().filter(|(_, _, e)| e.id == employee_id) {
            acc.add(values, employee);
        }
        acc.finish(self.places)
    }

    /// Totals across every counted value.
    pub fn grand_total(&self) -> Totals {
        let mut acc = Accumulator::default();
        for (_, values, employee) in self.counted() {
            acc.add(values, employee);
        }
        acc.finish(self.places)
    }

    /// Every daily and employee total plus the grand total, in one pass.
    pub fn totals(&self) -> TimesheetTotals {
        let mut daily: BTreeMap<String, Accumulator> = BTreeMap::new();
        let mut per_employee: BTreeMap<i64, Accumulator> = BTreeMap::new();
        let mut grand = Accumulator::default();

        for (day, values, employee) in self.counted() {
            daily.entry(day.to_string()).or_default().add(values, employee);
            per_employee.entry(employee.id).or_default().add(values, employee);
            grand.add(values, employee);
        }

        TimesheetTotals {
            daily: daily
                .into_iter()
                .map(|(day, acc)| (day, acc.finish(self.places)))
                .collect(),
            employees: per_employee
                .into_iter()
                .map(|(id, acc)| (id, acc.finish(self.places)))
                .collect(),
            grand: grand.finish(self.places),
        }
    }
}

impl TimesheetTotals {
    /// Computes all rollups for a values map.
    pub fn compute(
        values: &ValuesByDate,
        employees: &[Employee],
        filter: &EmployeeFilter,
        places: u32,
    ) -> Self {
        Rollup::new(values, employees, filter, places).totals()
    }
}
