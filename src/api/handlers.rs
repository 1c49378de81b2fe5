//! HTTP request handlers for the Payroll Engine API.
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
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_payroll_totals, employee_time_info, group_employee_shifts, summarize_employees,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{Employee, Shift, ms_to_hours, total_clocked_ms};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationMetadata, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_error(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts employees and shifts and returns per-employee pay and totals.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // serde's message is only in the body text
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
            return json_error(ApiErrorResponse::bad_request(error));
        }
    };

    let employees: Vec<Employee> = request.employees.into_iter().map(Into::into).collect();
    let shifts: Vec<Shift> = request.shifts.into_iter().map(Into::into).collect();

    match perform_calculation(
        correlation_id,
        &employees,
        &shifts,
        &request.employee_ids,
        state.config(),
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employees_count = result.employees.len(),
                shifts_count = shifts.len(),
                grand_total = %result.totals.grand_total(),
                duration_us = result.metadata.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            json_error(err.into())
        }
    }
}

/// Computes the payroll response for the submitted records.
fn perform_calculation(
    calculation_id: Uuid,
    employees: &[Employee],
    shifts: &[Shift],
    employee_ids: &[String],
    config: &ConfigLoader,
) -> EngineResult<CalculationResponse> {
    let start_time = Instant::now();

    for shift in shifts {
        shift.validate()?;
    }

    let rules = config.rules();
    let grouped = group_employee_shifts(employees, shifts, Some(employee_ids));
    let time_info: Vec<_> = grouped
        .iter()
        .map(|employee| employee_time_info(employee, &rules))
        .collect();

    let totals = compute_payroll_totals(&time_info);
    let clocked_ms: i64 = grouped.iter().map(|e| total_clocked_ms(&e.shifts)).sum();

    Ok(CalculationResponse {
        calculation_id,
        calculated_at: Utc::now(),
        employees: summarize_employees(&time_info),
        totals,
        total_clocked_hours: ms_to_hours(clocked_ms),
        metadata: CalculationMetadata {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            timezone: rules.timezone.name().to_string(),
            daily_threshold_hours: config.config().overtime.daily_threshold_hours,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{EmployeeRequest, ShiftRequest};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{DateTime, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_datetime(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc()
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest {
            employees: vec![EmployeeRequest {
                id: "1".to_string(),
                name: "Name".to_string(),
                email: "test@test.test".to_string(),
                hourly_rate: Decimal::from(2),
                hourly_rate_overtime: Decimal::from(1),
            }],
            shifts: vec![ShiftRequest {
                id: "1".to_string(),
                employee_id: "1".to_string(),
                clock_in: make_datetime("2023-02-03 23:00"),
                clock_out: make_datetime("2023-02-04 11:00"),
            }],
            employee_ids: vec![],
        }
    }

    async fn post_calculate(body: String) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn decimal_at(json: &serde_json::Value, pointer: &str) -> Decimal {
        match json.pointer(pointer) {
            Some(serde_json::Value::String(s)) => Decimal::from_str(s).unwrap(),
            Some(serde_json::Value::Number(n)) => Decimal::from_str(&n.to_string()).unwrap(),
            other => panic!("Expected decimal at {pointer}, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let (status, json) = post_calculate(body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["calculation_id"].is_string());
        assert_eq!(json["employees"].as_array().unwrap().len(), 1);
        assert_eq!(decimal_at(&json, "/totals/regular_total"), Decimal::from(18));
        assert_eq!(decimal_at(&json, "/totals/overtime_total"), Decimal::from(3));
        assert_eq!(decimal_at(&json, "/total_clocked_hours"), Decimal::from(12));
        assert_eq!(json["metadata"]["timezone"], "UTC");
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let (status, json) = post_calculate("{not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_field_returns_validation_error() {
        let (status, json) = post_calculate(r#"{"employees": []}"#.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_004_reversed_shift_returns_invalid_shift() {
        let mut request = create_valid_request();
        request.shifts[0].clock_out = make_datetime("2023-02-03 22:00");

        let (status, json) = post_calculate(serde_json::to_string(&request).unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_SHIFT");
    }

    #[test]
    fn test_perform_calculation_applies_filter() {
        let request = create_valid_request();
        let mut employees: Vec<Employee> =
            request.employees.into_iter().map(Into::into).collect();
        let mut other = employees[0].clone();
        other.id = "2".to_string();
        employees.push(other);
        let shifts: Vec<Shift> = request.shifts.into_iter().map(Into::into).collect();

        let result = perform_calculation(
            Uuid::new_v4(),
            &employees,
            &shifts,
            &["2".to_string()],
            &ConfigLoader::default(),
        )
        .unwrap();

        assert_eq!(result.employees.len(), 1);
        assert_eq!(result.employees[0].id, "2");
        assert_eq!(result.totals.grand_total(), Decimal::ZERO);
        assert_eq!(result.total_clocked_hours, Decimal::ZERO);
    }
}
