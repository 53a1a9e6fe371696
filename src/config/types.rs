//! Configuration types for the timesheet engine.
//!
//! This module contains the policy constants the engine falls back on and
//! the strongly-typed [`EngineConfig`] deserialized from `engine.yaml`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::GraceThresholds;

/// Standard working day used as the overtime baseline when no schedule matches.
pub const STANDARD_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Duration given to schedules that do not author one (8.00 hours).
pub const DEFAULT_SCHEDULE_HOURS: Decimal = Decimal::from_parts(800, 0, 0, false, 2);

/// Overtime rate multiplier given to schedules that do not author one (1.00).
pub const DEFAULT_OVERTIME_RATE: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Decimal places kept on every hour and money figure.
pub const ROUNDING_PLACES: u32 = 2;

/// Grace thresholds applied to outlets without a policy row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraceDefaults {
    /// Thresholds for clock-in and break-start comparisons.
    pub clock_in: GraceThresholds,
    /// Thresholds for clock-out and break-end comparisons.
    pub clock_out: GraceThresholds,
}

/// Engine policy configuration.
///
/// Every field has a default, so a partial or empty `engine.yaml` is valid.
///
/// # Example
///
/// ```
/// use timesheet_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config: EngineConfig = serde_yaml::from_str("standard_day_hours: 7.6").unwrap();
/// assert_eq!(config.standard_day_hours, Decimal::new(76, 1));
/// assert_eq!(config.rounding_places, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overtime baseline in hours when a record has no usable schedule.
    pub standard_day_hours: Decimal,
    /// Duration for schedules stored without one.
    pub default_schedule_hours: Decimal,
    /// Overtime rate for schedules stored without one.
    pub default_overtime_rate: Decimal,
    /// Decimal places for hours and cost figures.
    pub rounding_places: u32,
    /// Grace thresholds for outlets with no policy row.
    pub default_grace: GraceDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standard_day_hours: STANDARD_DAY_HOURS,
            default_schedule_hours: DEFAULT_SCHEDULE_HOURS,
            default_overtime_rate: DEFAULT_OVERTIME_RATE,
            rounding_places: ROUNDING_PLACES,
            default_grace: GraceDefaults::default(),
        }
    }
}
