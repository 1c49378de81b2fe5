//! Grouping shifts by employee.
//!
//! This module attaches each employee's shifts to the employee record and
//! orders them by clock-in, which is the ordering every later calculation
//! step relies on.

use std::collections::HashMap;

use crate::models::{Employee, EmployeeWithShifts, Shift};

/// Groups shifts under their employees, ordered by ascending clock-in.
///
/// Employees keep the order of `employees`. Shifts with equal clock-in keep
/// their relative input order. When `filter` holds a non-empty list of
/// employee identifiers only those employees are returned; `None` or an
/// empty list returns everyone. Shifts whose employee is not listed are
/// ignored.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::group_employee_shifts;
/// use payroll_engine::models::{Employee, Shift};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     hourly_rate: Decimal::from(20),
///     hourly_rate_overtime: Decimal::from(30),
/// };
/// let late = Shift {
///     id: "late".to_string(),
///     employee_id: "emp_001".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2026, 1, 16, 9, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2026, 1, 16, 17, 0, 0).unwrap(),
/// };
/// let early = Shift {
///     id: "early".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
///     ..late.clone()
/// };
///
/// let grouped = group_employee_shifts(&[employee], &[late, early], None);
/// assert_eq!(grouped[0].shifts[0].id, "early");
/// assert_eq!(grouped[0].shifts[1].id, "late");
/// ```
pub fn group_employee_shifts(
    employees: &[Employee],
    shifts: &[Shift],
    filter: Option<&[String]>,
) -> Vec<EmployeeWithShifts> {
    let filter = filter.filter(|ids| !ids.is_empty());

    let mut by_employee: HashMap<&str, Vec<&Shift>> = HashMap::new();
    for shift in shifts {
        by_employee
            .entry(shift.employee_id.as_str())
            .or_default()
            .push(shift);
    }

    employees
        .iter()
        .filter(|employee| filter.is_none_or(|ids| ids.contains(&employee.id)))
        .map(|employee| {
            let mut own: Vec<Shift> = by_employee
                .get(employee.id.as_str())
                .map(|list| list.iter().map(|shift| (*shift).clone()).collect())
                .unwrap_or_default();
            own.sort_by_key(|shift| shift.clock_in);

            EmployeeWithShifts {
                employee: employee.clone(),
                shifts: own,
            }
        })
        .collect()
}
