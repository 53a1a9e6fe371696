//! HTTP API module for the timesheet engine.
//!
//! This module exposes reconciliation and rollups over an
//! [`AttendanceStore`](crate::store::AttendanceStore) as JSON endpoints:
//!
//! - `POST /reconcile` returns the values and colors maps for a date range.
//! - `POST /totals` returns daily, employee and grand totals for a date range.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ReconcileRequestBody, TotalsRequestBody};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
