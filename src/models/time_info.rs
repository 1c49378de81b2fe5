//! Working-time and payroll result models.
//!
//! This module contains [`EmployeeTimeInfo`], the per-employee result of the
//! time calculation, together with the derived [`EmployeeSummary`] rows and
//! organization-wide [`PayrollTotals`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Converts whole hours to milliseconds.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::hours_to_ms;
///
/// assert_eq!(hours_to_ms(8), 28_800_000);
/// ```
pub fn hours_to_ms(hours: i64) -> i64 {
    hours * MS_PER_HOUR
}

/// Converts milliseconds to (possibly fractional) hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::ms_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ms_to_hours(5_400_000), Decimal::new(15, 1)); // 1.5 hours
/// ```
pub fn ms_to_hours(ms: i64) -> Decimal {
    Decimal::from(ms) / Decimal::from(MS_PER_HOUR)
}

/// An employee together with their accumulated regular and overtime.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, EmployeeTimeInfo, hours_to_ms};
/// use rust_decimal::Decimal;
///
/// let info = EmployeeTimeInfo {
///     employee: Employee {
///         id: "1".to_string(),
///         name: "Name".to_string(),
///         email: "test@test.test".to_string(),
///         hourly_rate: Decimal::from(2),
///         hourly_rate_overtime: Decimal::from(1),
///     },
///     regular_ms: hours_to_ms(9),
///     overtime_ms: hours_to_ms(3),
/// };
/// assert_eq!(info.regular_pay(), Decimal::from(18));
/// assert_eq!(info.overtime_pay(), Decimal::from(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTimeInfo {
    /// The employee the figures belong to.
    pub employee: Employee,
    /// Milliseconds paid at the regular rate.
    pub regular_ms: i64,
    /// Milliseconds paid at the overtime rate.
    pub overtime_ms: i64,
}

impl EmployeeTimeInfo {
    /// Total worked milliseconds (regular plus overtime).
    pub fn total_ms(&self) -> i64 {
        self.regular_ms + self.overtime_ms
    }

    /// Regular time in hours.
    pub fn regular_hours(&self) -> Decimal {
        ms_to_hours(self.regular_ms)
    }

    /// Overtime in hours.
    pub fn overtime_hours(&self) -> Decimal {
        ms_to_hours(self.overtime_ms)
    }

    /// Amount owed for regular time.
    pub fn regular_pay(&self) -> Decimal {
        self.regular_hours() * self.employee.hourly_rate
    }

    /// Amount owed for overtime.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime_hours() * self.employee.hourly_rate_overtime
    }
}

/// One payroll row per employee, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub id: String,
    /// Employee display name.
    pub name: String,
    /// Employee email.
    pub email: String,
    /// Regular plus overtime, in hours.
    pub total_clocked_hours: Decimal,
    /// Amount owed for regular time.
    pub regular_paid: Decimal,
    /// Amount owed for overtime.
    pub overtime_paid: Decimal,
}

impl From<&EmployeeTimeInfo> for EmployeeSummary {
    fn from(info: &EmployeeTimeInfo) -> Self {
        Self {
            id: info.employee.id.clone(),
            name: info.employee.name.clone(),
            email: info.employee.email.clone(),
            total_clocked_hours: ms_to_hours(info.total_ms()),
            regular_paid: info.regular_pay(),
            overtime_paid: info.overtime_pay(),
        }
    }
}

/// Organization-wide amounts owed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of regular pay across employees.
    pub regular_total: Decimal,
    /// Sum of overtime pay across employees.
    pub overtime_total: Decimal,
}

impl PayrollTotals {
    /// Regular plus overtime pay.
    pub fn grand_total(&self) -> Decimal {
        self.regular_total + self.overtime_total
    }
}
