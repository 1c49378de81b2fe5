//! Payroll aggregation.
//!
//! Turns per-employee regular/overtime time into amounts owed and sums them
//! across the organization.

use rust_decimal::Decimal;

use crate::models::{EmployeeSummary, EmployeeTimeInfo, PayrollTotals};

/// Sums regular and overtime pay across all employees.
///
/// Each employee's time is converted to hours and multiplied by their own
/// regular or overtime rate before summing.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll_totals;
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
///
/// let totals = compute_payroll_totals(&[info]);
/// assert_eq!(totals.regular_total, Decimal::from(18));
/// assert_eq!(totals.overtime_total, Decimal::from(3));
/// ```
pub fn compute_payroll_totals(time_info: &[EmployeeTimeInfo]) -> PayrollTotals {
    let regular_total: Decimal = time_info.iter().map(EmployeeTimeInfo::regular_pay).sum();
    let overtime_total: Decimal = time_info.iter().map(EmployeeTimeInfo::overtime_pay).sum();

    PayrollTotals {
        regular_total,
        overtime_total,
    }
}

/// Produces one payroll row per employee, in input order.
pub fn summarize_employees(time_info: &[EmployeeTimeInfo]) -> Vec<EmployeeSummary> {
    time_info.iter().map(EmployeeSummary::from).collect()
}
