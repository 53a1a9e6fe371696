//! HTTP request handlers for the timesheet engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{load_batch, reconcile, reconcile_batch};
use crate::error::{EngineError, EngineResult};
use crate::models::TimesheetTotals;
use crate::store::AttendanceStore;

use super::request::{ReconcileRequestBody, TotalsRequestBody};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: AttendanceStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler::<S>))
        .route("/totals", post(totals_handler::<S>))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{} failed", context
    );
    ApiErrorResponse::from(err).into_response()
}

/// Serializes a result and requires a JSON object at the top level.
fn to_json_object<T: Serialize>(result: &T) -> EngineResult<serde_json::Value> {
    let value = serde_json::to_value(result).map_err(|e| EngineError::StructuralError {
        message: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(EngineError::StructuralError {
            message: "result is not a JSON object".to_string(),
        });
    }
    Ok(value)
}

fn ok_response(value: serde_json::Value) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(value),
    )
        .into_response()
}

/// Handler for POST /reconcile endpoint.
///
/// Returns the values and colors maps for the requested range.
async fn reconcile_handler<S: AttendanceStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ReconcileRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconcile request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let request = match body.into_request() {
        Ok(request) => request,
        Err(err) => return error_response(correlation_id, err, "Request validation"),
    };

    let start_time = Instant::now();
    let result = match reconcile(state.store(), state.engine_config(), &request).await {
        Ok(result) => result,
        Err(err) => return error_response(correlation_id, err, "Reconciliation"),
    };

    match to_json_object(&result) {
        Ok(value) => {
            info!(
                correlation_id = %correlation_id,
                company_id = request.company_id,
                dates = result.values.len(),
                records = result.values.values().map(|day| day.len()).sum::<usize>(),
                skipped_records = result.skipped_records,
                duration_us = start_time.elapsed().as_micros(),
                "Reconciliation completed successfully"
            );
            ok_response(value)
        }
        Err(err) => error_response(correlation_id, err, "Reconciliation"),
    }
}

/// Handler for POST /totals endpoint.
///
/// Reconciles the requested range and returns daily, employee and grand
/// totals over the filtered employees.
async fn totals_handler<S: AttendanceStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<TotalsRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing totals request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let request = match body.reconcile.into_request() {
        Ok(request) => request,
        Err(err) => return error_response(correlation_id, err, "Request validation"),
    };

    let start_time = Instant::now();
    let batch = match load_batch(state.store(), &request).await {
        Ok(batch) => batch,
        Err(err) => return error_response(correlation_id, err, "Totals"),
    };

    let config = state.engine_config();
    let result = reconcile_batch(&batch, config);
    let totals = TimesheetTotals::compute(
        &result.values,
        &batch.employees,
        &body.filter,
        config.rounding_places,
    );

    match to_json_object(&totals) {
        Ok(value) => {
            info!(
                correlation_id = %correlation_id,
                company_id = request.company_id,
                employees = totals.employees.len(),
                grand_duration = %totals.grand.duration,
                grand_cost = %totals.grand.cost,
                duration_us = start_time.elapsed().as_micros(),
                "Totals completed successfully"
            );
            ok_response(value)
        }
        Err(err) => error_response(correlation_id, err, "Totals"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{ClockEvent, Employee, Schedule, TimeRecord};
    use crate::store::InMemoryStore;
    use axum::{body::Body, http::Request};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use tower::ServiceExt;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn create_test_state() -> AppState<InMemoryStore> {
        let store = InMemoryStore::new();

        let mut record = TimeRecord::new(1, 10, 100, 1000);
        record.clock_in = Some(ClockEvent::at(make_datetime("2024-01-05", "09:12:00")));
        record.clock_out = Some(ClockEvent::at(make_datetime("2024-01-05", "17:00:00")));
        store.upsert_time_record(record).unwrap();

        let mut schedule = Schedule::new(1, 10, 100, 1000, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        schedule.start_time = NaiveTime::from_hms_opt(9, 0, 0);
        schedule.end_time = NaiveTime::from_hms_opt(17, 0, 0);
        store.insert_schedule(schedule).unwrap();

        store.insert_employee(Employee::new(10, 1000, "Ada", "Lovelace")).unwrap();

        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config, store)
    }

    async fn post(uri: &str, body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_api_001_valid_reconcile_returns_200() {
        let body = r#"{"company_id": 1000, "start_date": "2024-01-01", "end_date": "2024-01-07"}"#;
        let (status, json) = post("/reconcile", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["values"]["2024-01-05"]["10"]["duration"], "7.80");
        assert_eq!(json["values"]["2024-01-05"]["10"]["overtime"], "0.00");
        assert_eq!(json["colors"]["2024-01-05"]["10"]["clock_in_color"], "red");
        assert_eq!(json["skipped_records"], 0);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let (status, json) = post("/reconcile", "{invalid json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_field_returns_validation_error() {
        let body = r#"{"company_id": 1000, "start_date": "2024-01-01"}"#;
        let (status, json) = post("/reconcile", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("end_date"));
    }

    #[tokio::test]
    async fn test_api_004_invalid_date_returns_400() {
        let body = r#"{"company_id": 1000, "start_date": "someday", "end_date": "2024-01-07"}"#;
        let (status, json) = post("/reconcile", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_DATE");
    }

    #[tokio::test]
    async fn test_api_005_inverted_range_returns_400() {
        let body = r#"{"company_id": 1000, "start_date": "2024-01-07", "end_date": "2024-01-01"}"#;
        let (status, json) = post("/reconcile", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_api_006_empty_range_returns_empty_maps() {
        let body = r#"{"company_id": 1000, "start_date": "2023-01-01", "end_date": "2023-01-07"}"#;
        let (status, json) = post("/reconcile", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["values"], serde_json::json!({}));
        assert_eq!(json["colors"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_api_007_totals_returns_200() {
        let body = r#"{"company_id": 1000, "start_date": "2024-01-01", "end_date": "2024-01-07"}"#;
        let (status, json) = post("/totals", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["grand"]["duration"], "7.80");
        assert_eq!(json["daily"]["2024-01-05"]["duration"], "7.80");
        assert_eq!(json["employees"]["10"]["cost"], "0.00");
    }

    #[tokio::test]
    async fn test_totals_filter_excludes_employees() {
        let body = r#"{
            "company_id": 1000,
            "start_date": "2024-01-01",
            "end_date": "2024-01-07",
            "filter": {"search": "nobody"}
        }"#;
        let (status, json) = post("/totals", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["grand"]["duration"], "0.00");
        assert_eq!(json["employees"], serde_json::json!({}));
    }

    #[test]
    fn test_non_object_result_is_structural_error() {
        assert!(to_json_object(&serde_json::json!({"values": {}})).is_ok());
        assert!(matches!(
            to_json_object(&vec![1, 2, 3]),
            Err(EngineError::StructuralError { .. })
        ));
    }
}
