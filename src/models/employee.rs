//! Employee model and related types.
//!
//! This module defines the [`Employee`] record as served by the store and the
//! [`EmployeeWithShifts`] view the calculation and reconciliation paths share.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Shift;

/// Represents an employee whose shifts are paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, stable identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Hourly rate paid for regular time.
    pub hourly_rate: Decimal,
    /// Hourly rate paid for overtime.
    pub hourly_rate_overtime: Decimal,
}

impl Employee {
    /// Returns true if any field that reconciliation persists differs from `other`.
    ///
    /// Only the name and the two hourly rates are compared; the email is not
    /// editable and is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let original = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ada".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     hourly_rate: Decimal::new(2000, 2),
    ///     hourly_rate_overtime: Decimal::new(3000, 2),
    /// };
    /// let mut edited = original.clone();
    /// assert!(!edited.differs_from(&original));
    ///
    /// edited.hourly_rate = Decimal::new(2100, 2);
    /// assert!(edited.differs_from(&original));
    /// ```
    pub fn differs_from(&self, other: &Employee) -> bool {
        self.name != other.name
            || self.hourly_rate != other.hourly_rate
            || self.hourly_rate_overtime != other.hourly_rate_overtime
    }
}

/// An employee together with their shifts, ordered by ascending clock-in.
///
/// Built by [`group_employee_shifts`](crate::calculation::group_employee_shifts),
/// which is the only place that establishes the ordering; consumers rely on it
/// without re-sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWithShifts {
    /// The employee record.
    #[serde(flatten)]
    pub employee: Employee,
    /// The employee's shifts, ascending by clock-in.
    pub shifts: Vec<Shift>,
}

impl EmployeeWithShifts {
    /// Returns the employee identifier.
    pub fn id(&self) -> &str {
        &self.employee.id
    }

    /// Finds one of this employee's shifts by identifier.
    pub fn shift(&self, shift_id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|shift| shift.id == shift_id)
    }

    /// Mutable access to one of this employee's shifts, for editing.
    pub fn shift_mut(&mut self, shift_id: &str) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|shift| shift.id == shift_id)
    }
}
