//! Per-outlet grace-period policy.

use serde::{Deserialize, Serialize};

use crate::config::GraceDefaults;

/// Minute thresholds for one direction of comparison (clock-in or clock-out).
///
/// `late` is a label threshold only: anything past `slightly_late` is late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraceThresholds {
    /// Minutes early still considered within tolerance.
    pub early: u32,
    /// Minutes late still considered slightly late.
    pub slightly_late: u32,
    /// Minutes from which an event is labelled late.
    pub late: u32,
}

impl GraceThresholds {
    /// Creates thresholds from the three minute values.
    pub fn new(early: u32, slightly_late: u32, late: u32) -> Self {
        Self {
            early,
            slightly_late,
            late,
        }
    }
}

/// Grace-period configuration for an outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletGracePolicy {
    /// The outlet this policy belongs to.
    pub outlet_id: i64,
    /// The company owning the outlet.
    pub company_id: i64,
    /// Thresholds used for clock-in and break-start.
    #[serde(default)]
    pub clock_in: GraceThresholds,
    /// Thresholds used for clock-out and break-end.
    #[serde(default)]
    pub clock_out: GraceThresholds,
}

impl OutletGracePolicy {
    /// Builds a policy for an outlet that has no stored row.
    pub fn from_defaults(outlet_id: i64, company_id: i64, defaults: &GraceDefaults) -> Self {
        Self {
            outlet_id,
            company_id,
            clock_in: defaults.clock_in,
            clock_out: defaults.clock_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_defaults_zero() {
        let policy = OutletGracePolicy::from_defaults(3, 1, &GraceDefaults::default());
        assert_eq!(policy.outlet_id, 3);
        assert_eq!(policy.clock_in, GraceThresholds::new(0, 0, 0));
        assert_eq!(policy.clock_out, GraceThresholds::new(0, 0, 0));
    }

    #[test]
    fn test_deserialization_missing_fields_default_to_zero() {
        let json = r#"{"outlet_id": 3, "company_id": 1, "clock_in": {"early": 5}}"#;
        let policy: OutletGracePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.clock_in, GraceThresholds::new(5, 0, 0));
        assert_eq!(policy.clock_out, GraceThresholds::default());
    }
}
