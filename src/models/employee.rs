//! Employee model.
//!
//! The engine only needs the employee attributes that drive cost rollups and
//! employee filtering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// An employee of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// The company employing this person.
    pub company_id: i64,
    /// Home outlet, if assigned.
    #[serde(default)]
    pub outlet_id: Option<i64>,
    /// Section within the outlet, if assigned.
    #[serde(default)]
    pub section_id: Option<i64>,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Hourly pay used for cost rollups.
    #[serde(default)]
    pub hourly_pay: Option<Decimal>,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Employee {
    /// Creates an active employee with no outlet, section or pay set.
    pub fn new(id: i64, company_id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            company_id,
            outlet_id: None,
            section_id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            hourly_pay: None,
            active: true,
        }
    }

    /// Returns "first last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Cost of the given hours at this employee's hourly pay, zero if unset.
    ///
    /// Returns `None` if the product overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee::new(1, 1, "Ana", "Lim");
    /// assert_eq!(employee.cost_for(Decimal::new(85, 1)), Some(Decimal::ZERO));
    ///
    /// employee.hourly_pay = Some(Decimal::new(20, 0));
    /// assert_eq!(employee.cost_for(Decimal::new(85, 1)), Some(Decimal::new(170, 0)));
    /// assert_eq!(employee.cost_for(Decimal::MAX), None);
    /// ```
    pub fn cost_for(&self, hours: Decimal) -> Option<Decimal> {
        match self.hourly_pay {
            Some(pay) => hours.checked_mul(pay),
            None => Some(Decimal::ZERO),
        }
    }
}
