//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST endpoint for computing working time,
//! overtime and pay from submitted employees and shifts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeRequest, ShiftRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationMetadata, CalculationResponse};
pub use state::AppState;
