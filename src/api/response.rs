//! Response types for the Payroll Engine API.
//!
//! This module defines the success payload of `/calculate` and the error
//! response structures used by every handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EmployeeSummary, PayrollTotals};

/// Successful response body of the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Identifier of this calculation, also used as the log correlation id.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub calculated_at: DateTime<Utc>,
    /// One row per reported employee.
    pub employees: Vec<EmployeeSummary>,
    /// Pay totals across the reported employees.
    pub totals: PayrollTotals,
    /// Sum of the reported employees' shift durations, in hours.
    pub total_clocked_hours: Decimal,
    /// How the calculation was performed.
    pub metadata: CalculationMetadata,
}

/// Calculation parameters and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationMetadata {
    /// Crate version that produced the result.
    pub engine_version: String,
    /// Timezone used for calendar days.
    pub timezone: String,
    /// Daily overtime threshold in hours.
    pub daily_threshold_hours: Decimal,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
}

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
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::InvalidShift { shift_id, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT",
                    format!("Invalid shift '{}': {}", shift_id, message),
                    "The shift data contains invalid information",
                ),
            },
            EngineError::StoreRead { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details("STORE_READ_FAILED", "Store read failed", message),
            },
            EngineError::StoreWrite { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "STORE_WRITE_FAILED",
                    "Store write failed",
                    error.to_string(),
                ),
            },
            EngineError::SnapshotNotReady => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("NOT_READY", error.to_string()),
            },
            EngineError::ReconcileInterrupted { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "RECONCILE_INTERRUPTED",
                    "Reconciliation interrupted",
                    message,
                ),
            },
        }
    }
}
