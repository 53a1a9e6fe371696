//! Calculation logic for the timesheet engine.
//!
//! This module contains the duration calculator (worked hours net of breaks
//! and overtime against the schedule or standard day), the grace classifier,
//! schedule resolution, the reconciliation aggregator and the rollups built
//! on its output.

mod duration;
mod grace;
mod reconcile;
mod rollup;
mod rounding;
mod schedule_resolver;

pub use duration::{
    RecordHours, calculate_record_hours, overtime_baseline, scheduled_hours, worked_minutes,
};
pub use grace::{classify, classify_record};
pub use reconcile::{ReconcileBatch, ReconcileRequest, load_batch, reconcile, reconcile_batch};
pub use rollup::{EmployeeFilter, Rollup};
pub use rounding::{minutes_to_hours, round_to};
pub use schedule_resolver::{ScheduleIndex, resolve_schedule};
