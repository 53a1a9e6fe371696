//! Timesheet reconciliation engine
//!
//! This crate reconciles clock-in/out time records against planned schedules.
//! It computes worked hours net of breaks and overtime, classifies each clock
//! event against per-outlet grace periods, and rolls the results up into
//! daily, employee and grand totals for payroll review.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
