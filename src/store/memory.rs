//! In-memory attendance store.

use std::future::{Future, ready};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, OutletGracePolicy, Schedule, TimeRecord};

use super::AttendanceStore;
use super::rows::{OutletGracePolicyRow, ScheduleRow, TimeRecordRow};

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::Storage {
        message: "in-memory store lock poisoned".to_string(),
    }
}

/// An [`AttendanceStore`] held in process memory.
///
/// Time records are append-or-update only. Schedules enforce the one
/// schedule per (employee, date) rule at insertion.
///
/// # Example
///
/// ```
/// use timesheet_engine::store::InMemoryStore;
/// use timesheet_engine::models::{Employee, Schedule};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
///
/// store.insert_employee(Employee::new(10, 1000, "Ada", "Lovelace")).unwrap();
/// store.insert_schedule(Schedule::new(1, 10, 100, 1000, date)).unwrap();
/// assert!(store.insert_schedule(Schedule::new(2, 10, 100, 1000, date)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    config: EngineConfig,
    time_records: RwLock<Vec<TimeRecord>>,
    schedules: RwLock<Vec<Schedule>>,
    grace_policies: RwLock<Vec<OutletGracePolicy>>,
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryStore {
    /// Creates an empty store using the default engine configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose row conversions use `config` defaults.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Appends a time record, or replaces the stored record with the same id.
    pub fn upsert_time_record(&self, record: TimeRecord) -> EngineResult<()> {
        let mut records = self.time_records.write().map_err(poisoned)?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Converts and upserts a `time_records` row.
    pub fn upsert_time_record_row(&self, row: TimeRecordRow) -> EngineResult<()> {
        self.upsert_time_record(row.into_record())
    }

    /// Inserts a schedule.
    ///
    /// Returns `DuplicateSchedule` if the employee already has a schedule on
    /// that date.
    pub fn insert_schedule(&self, schedule: Schedule) -> EngineResult<()> {
        let mut schedules = self.schedules.write().map_err(poisoned)?;
        if schedules
            .iter()
            .any(|s| s.employee_id == schedule.employee_id && s.date == schedule.date)
        {
            return Err(EngineError::DuplicateSchedule {
                employee_id: schedule.employee_id,
                date: schedule.date,
            });
        }
        schedules.push(schedule);
        Ok(())
    }

    /// Converts and inserts a `schedules` row.
    pub fn insert_schedule_row(&self, row: ScheduleRow) -> EngineResult<()> {
        let schedule = row.into_schedule(&self.config)?;
        self.insert_schedule(schedule)
    }

    /// Stores an outlet's grace policy, replacing any previous one.
    pub fn upsert_grace_policy(&self, policy: OutletGracePolicy) -> EngineResult<()> {
        let mut policies = self.grace_policies.write().map_err(poisoned)?;
        policies.retain(|p| p.outlet_id != policy.outlet_id);
        policies.push(policy);
        Ok(())
    }

    /// Converts and upserts an outlet grace-policy row.
    pub fn upsert_grace_policy_row(&self, row: OutletGracePolicyRow) -> EngineResult<()> {
        self.upsert_grace_policy(row.into_policy())
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write().map_err(poisoned)?;
        employees.retain(|e| e.id != employee.id);
        employees.push(employee);
        Ok(())
    }

    fn time_records_matching(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> EngineResult<Vec<TimeRecord>> {
        let records = self.time_records.read().map_err(poisoned)?;
        let found: Vec<TimeRecord> = records
            .iter()
            .filter(|r| r.company_id == company_id)
            .filter(|r| outlet_id.is_none_or(|outlet| r.outlet_id == outlet))
            .filter(|r| match r.clock_in_at() {
                Some(instant) => range.contains_instant(instant),
                None => r.date.is_some_and(|date| range.contains_date(date)),
            })
            .cloned()
            .collect();
        debug!(company_id, count = found.len(), "Loaded time records");
        Ok(found)
    }

    fn schedules_matching(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> EngineResult<Vec<Schedule>> {
        let schedules = self.schedules.read().map_err(poisoned)?;
        Ok(schedules
            .iter()
            .filter(|s| s.company_id == company_id)
            .filter(|s| outlet_id.is_none_or(|outlet| s.outlet_id == outlet))
            .filter(|s| range.contains_date(s.date))
            .cloned()
            .collect())
    }

    fn grace_policies_matching(
        &self,
        company_id: i64,
        outlet_ids: Option<&[i64]>,
    ) -> EngineResult<Vec<OutletGracePolicy>> {
        let policies = self.grace_policies.read().map_err(poisoned)?;
        Ok(policies
            .iter()
            .filter(|p| p.company_id == company_id)
            .filter(|p| outlet_ids.is_none_or(|ids| ids.contains(&p.outlet_id)))
            .cloned()
            .collect())
    }

    fn employees_matching(&self, company_id: i64) -> EngineResult<Vec<Employee>> {
        let employees = self.employees.read().map_err(poisoned)?;
        Ok(employees
            .iter()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    }
}

impl AttendanceStore for InMemoryStore {
    fn find_time_records(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> impl Future<Output = EngineResult<Vec<TimeRecord>>> + Send {
        ready(self.time_records_matching(company_id, outlet_id, range))
    }

    fn find_schedules(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> impl Future<Output = EngineResult<Vec<Schedule>>> + Send {
        ready(self.schedules_matching(company_id, outlet_id, range))
    }

    fn find_grace_policies(
        &self,
        company_id: i64,
        outlet_ids: Option<&[i64]>,
    ) -> impl Future<Output = EngineResult<Vec<OutletGracePolicy>>> + Send {
        ready(self.grace_policies_matching(company_id, outlet_ids))
    }

    fn find_employees(
        &self,
        company_id: i64,
    ) -> impl Future<Output = EngineResult<Vec<Employee>>> + Send {
        ready(self.employees_matching(company_id))
    }
}
