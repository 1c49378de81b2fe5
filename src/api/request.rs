//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, Shift};

/// Request body for the `/calculate` endpoint.
///
/// Contains the employee and shift lists to compute payroll for. When
/// `employee_ids` is non-empty only those employees are reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employees to pay.
    pub employees: Vec<EmployeeRequest>,
    /// The shifts worked by those employees.
    pub shifts: Vec<ShiftRequest>,
    /// Optional filter on employee identifiers.
    #[serde(default)]
    pub employee_ids: Vec<String>,
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Hourly rate for regular time.
    pub hourly_rate: Decimal,
    /// Hourly rate for overtime.
    pub hourly_rate_overtime: Decimal,
}

/// Shift information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// Clock-in instant (RFC 3339).
    pub clock_in: DateTime<Utc>,
    /// Clock-out instant (RFC 3339).
    pub clock_out: DateTime<Utc>,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            email: req.email,
            hourly_rate: req.hourly_rate,
            hourly_rate_overtime: req.hourly_rate_overtime,
        }
    }
}

impl From<ShiftRequest> for Shift {
    fn from(req: ShiftRequest) -> Self {
        Shift {
            id: req.id,
            employee_id: req.employee_id,
            clock_in: req.clock_in,
            clock_out: req.clock_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "employees": [
                {
                    "id": "1",
                    "name": "Name",
                    "email": "test@test.test",
                    "hourly_rate": "2",
                    "hourly_rate_overtime": "1"
                }
            ],
            "shifts": [
                {
                    "id": "1",
                    "employee_id": "1",
                    "clock_in": "2023-02-03T23:00:00Z",
                    "clock_out": "2023-02-04T11:00:00Z"
                }
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0].hourly_rate, Decimal::from(2));
        assert_eq!(request.shifts[0].employee_id, "1");
        assert!(request.employee_ids.is_empty());
    }

    #[test]
    fn test_deserialize_offset_timestamps_normalized_to_utc() {
        let json = r#"{
            "id": "s1",
            "employee_id": "e1",
            "clock_in": "2026-01-15T09:00:00+02:00",
            "clock_out": "2026-01-15T17:00:00+02:00"
        }"#;

        let shift: ShiftRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            shift.clock_in,
            Utc.with_ymd_and_hms(2026, 1, 15, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_shift_conversion() {
        let req = ShiftRequest {
            id: "shift_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
            clock_out: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
        };

        let shift: Shift = req.into();
        assert_eq!(shift.id, "shift_001");
        assert_eq!(shift.duration_ms(), 8 * 3_600_000);
    }
}
