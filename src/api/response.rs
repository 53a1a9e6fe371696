//! Response types for the timesheet engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidDate { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DATE",
                    message,
                    format!("'{}' must be a calendar date such as 2024-01-05", field),
                ),
            ),
            EngineError::TimeParse(_) => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_DATE", message))
            }
            EngineError::InvalidDateRange { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    message,
                    "start_date must not be after end_date",
                ),
            ),
            EngineError::DuplicateSchedule { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_SCHEDULE", message),
            },
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Attendance storage unavailable",
                    message,
                ),
            },
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            EngineError::StructuralError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STRUCTURAL_ERROR",
                    "Reconciliation produced an invalid result",
                    message,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeParseError;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_date_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidDate {
            field: "end_date".to_string(),
            source: TimeParseError::InvalidDate {
                input: "tomorrow".to_string(),
            },
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DATE");
        assert!(api_error.error.message.contains("tomorrow"));
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::Storage {
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STORAGE_ERROR");
        assert!(api_error.error.details.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_structural_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::StructuralError {
            message: "expected an object".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STRUCTURAL_ERROR");
    }

    #[test]
    fn test_duplicate_schedule_maps_to_conflict() {
        let api_error: ApiErrorResponse = EngineError::DuplicateSchedule {
            employee_id: 10,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }
}
