//! Attendance storage contracts.
//!
//! The engine reads its inputs through [`AttendanceStore`]. The relational
//! row shapes live in [`rows`] and convert into the domain models at this
//! boundary. [`InMemoryStore`] backs the tests, benchmarks and the API.

use std::future::Future;

use crate::error::EngineResult;
use crate::models::{DateRange, Employee, OutletGracePolicy, Schedule, TimeRecord};

mod memory;
pub mod rows;

pub use memory::InMemoryStore;
pub use rows::{OutletGracePolicyRow, ScheduleRow, TimeRecordRow};

/// Read access to time records, schedules, grace policies and employees.
///
/// The four reads have no ordering dependency and may be issued
/// concurrently. A failing read means the store is unavailable and fails the
/// whole request with [`EngineError::Storage`](crate::error::EngineError::Storage).
pub trait AttendanceStore: Send + Sync {
    /// Time records for a company whose clock-in falls within the range,
    /// optionally restricted to one outlet.
    fn find_time_records(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> impl Future<Output = EngineResult<Vec<TimeRecord>>> + Send;

    /// Schedules for a company dated within the range, optionally restricted
    /// to one outlet.
    fn find_schedules(
        &self,
        company_id: i64,
        outlet_id: Option<i64>,
        range: DateRange,
    ) -> impl Future<Output = EngineResult<Vec<Schedule>>> + Send;

    /// Grace policies for a company, optionally restricted to some outlets.
    fn find_grace_policies(
        &self,
        company_id: i64,
        outlet_ids: Option<&[i64]>,
    ) -> impl Future<Output = EngineResult<Vec<OutletGracePolicy>>> + Send;

    /// All employees of a company.
    fn find_employees(&self, company_id: i64)
    -> impl Future<Output = EngineResult<Vec<Employee>>> + Send;
}
