//! Change detection between an original and an edited snapshot.
//!
//! Only records present in both snapshots are compared. Records created or
//! deleted in the edited copy are not reported.

use std::collections::HashMap;

use crate::models::{ChangeSet, EmployeeWithShifts, Shift};

/// Collects the employees and shifts whose persisted fields were edited.
///
/// An employee is reported when its name or either hourly rate differs; a
/// shift is reported when its clock-in or clock-out differs. Shifts are
/// looked up by id among the edited employee's own shifts. The change set
/// carries the edited values in the order of `original`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, EmployeeWithShifts};
/// use payroll_engine::reconcile::detect_changes;
/// use rust_decimal::Decimal;
///
/// let original = EmployeeWithShifts {
///     employee: Employee {
///         id: "emp_001".to_string(),
///         name: "Ada".to_string(),
///         email: "ada@example.com".to_string(),
///         hourly_rate: Decimal::from(20),
///         hourly_rate_overtime: Decimal::from(30),
///     },
///     shifts: vec![],
/// };
/// let mut edited = original.clone();
/// edited.employee.hourly_rate = Decimal::from(22);
///
/// let changes = detect_changes(&[original], &[edited]);
/// assert_eq!(changes.employees.len(), 1);
/// assert_eq!(changes.employees[0].hourly_rate, Decimal::from(22));
/// ```
pub fn detect_changes(original: &[EmployeeWithShifts], edited: &[EmployeeWithShifts]) -> ChangeSet {
    let edited_by_id: HashMap<&str, &EmployeeWithShifts> =
        edited.iter().map(|e| (e.id(), e)).collect();

    let mut changes = ChangeSet::default();

    for before in original {
        let Some(after) = edited_by_id.get(before.id()) else {
            continue;
        };

        if after.employee.differs_from(&before.employee) {
            changes.employees.push(after.employee.clone());
        }

        let edited_shifts: HashMap<&str, &Shift> =
            after.shifts.iter().map(|s| (s.id.as_str(), s)).collect();

        for shift in &before.shifts {
            let Some(edited_shift) = edited_shifts.get(shift.id.as_str()) else {
                continue;
            };
            if edited_shift.clock_in != shift.clock_in || edited_shift.clock_out != shift.clock_out {
                changes.shifts.push((*edited_shift).clone());
            }
        }
    }

    changes
}
