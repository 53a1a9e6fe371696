//! Request types for the timesheet engine API.
//!
//! Dates arrive as strings so that an unparseable value is reported as
//! `INVALID_DATE` rather than a generic JSON error.

use serde::{Deserialize, Serialize};

use crate::calculation::{EmployeeFilter, ReconcileRequest};
use crate::error::EngineResult;
use crate::models::DateRange;

/// Request body for the `/reconcile` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequestBody {
    /// The company whose timesheet is reconciled.
    pub company_id: i64,
    /// Restrict to one outlet.
    #[serde(default)]
    pub outlet_id: Option<i64>,
    /// First day of the range, `yyyy-MM-dd`.
    pub start_date: String,
    /// Last day of the range, `yyyy-MM-dd`.
    pub end_date: String,
}

impl ReconcileRequestBody {
    /// Validates the dates and builds the engine request.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::api::ReconcileRequestBody;
    ///
    /// let body = ReconcileRequestBody {
    ///     company_id: 1000,
    ///     outlet_id: None,
    ///     start_date: "2024-01-01".to_string(),
    ///     end_date: "2024-01-07".to_string(),
    /// };
    /// assert_eq!(body.into_request().unwrap().range.days(), 7);
    /// ```
    pub fn into_request(&self) -> EngineResult<ReconcileRequest> {
        let range = DateRange::parse(&self.start_date, &self.end_date)?;
        Ok(ReconcileRequest::new(self.company_id, self.outlet_id, range))
    }
}

/// Request body for the `/totals` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsRequestBody {
    /// The range to reconcile.
    #[serde(flatten)]
    pub reconcile: ReconcileRequestBody,
    /// Which employees to total.
    #[serde(default)]
    pub filter: EmployeeFilter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_deserialize_without_outlet() {
        let json = r#"{"company_id": 1000, "start_date": "2024-01-01", "end_date": "2024-01-07"}"#;
        let body: ReconcileRequestBody = serde_json::from_str(json).unwrap();
        assert!(body.outlet_id.is_none());

        let request = body.into_request().unwrap();
        assert_eq!(request.company_id, 1000);
        assert_eq!(request.range.days(), 7);
    }

    #[test]
    fn test_invalid_start_date() {
        let body = ReconcileRequestBody {
            company_id: 1000,
            outlet_id: Some(100),
            start_date: "01/01/2024".to_string(),
            end_date: "2024-01-07".to_string(),
        };
        match body.into_request() {
            Err(EngineError::InvalidDate { field, .. }) => assert_eq!(field, "start_date"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_range() {
        let body = ReconcileRequestBody {
            company_id: 1000,
            outlet_id: None,
            start_date: "2024-01-07".to_string(),
            end_date: "2024-01-01".to_string(),
        };
        assert!(matches!(
            body.into_request(),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_totals_body_flattens_reconcile_fields() {
        let json = r#"{
            "company_id": 1000,
            "outlet_id": 100,
            "start_date": "2024-01-01",
            "end_date": "2024-01-07",
            "filter": {"active_only": false}
        }"#;
        let body: TotalsRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.reconcile.outlet_id, Some(100));
        assert!(!body.filter.active_only);
    }

    #[test]
    fn test_totals_body_filter_optional() {
        let json = r#"{"company_id": 1000, "start_date": "2024-01-01", "end_date": "2024-01-01"}"#;
        let body: TotalsRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.filter, EmployeeFilter::default());
        assert!(body.filter.active_only);
    }
}
