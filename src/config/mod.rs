//! Configuration loading and management for the timesheet engine.
//!
//! This module provides the engine policy constants and the YAML-backed
//! [`EngineConfig`] that overrides them per deployment.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding to {} places", config.config().rounding_places);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_OVERTIME_RATE, DEFAULT_SCHEDULE_HOURS, EngineConfig, GraceDefaults, ROUNDING_PLACES,
    STANDARD_DAY_HOURS,
};
