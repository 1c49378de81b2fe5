//! Snapshot of the employee and shift lists as last known from the store.

use serde::{Deserialize, Serialize};

use super::{Employee, Shift};

/// Employee and shift lists as last read from, or last written to, the store.
///
/// A snapshot is never mutated once shared; writers clone it, apply their
/// changes with the `replace_*` methods and publish the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All known employees, in store order.
    pub employees: Vec<Employee>,
    /// All known shifts, in store order.
    pub shifts: Vec<Shift>,
}

impl Snapshot {
    /// Creates a snapshot from the two store lists.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self { employees, shifts }
    }

    /// Replaces the employee with the same identifier.
    ///
    /// Returns false, leaving the snapshot untouched, if no such employee exists.
    pub fn replace_employee(&mut self, employee: Employee) -> bool {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => {
                *slot = employee;
                true
            }
            None => false,
        }
    }

    /// Replaces the shift with the same identifier.
    ///
    /// Returns false, leaving the snapshot untouched, if no such shift exists.
    pub fn replace_shift(&mut self, shift: Shift) -> bool {
        match self.shifts.iter_mut().find(|s| s.id == shift.id) {
            Some(slot) => {
                *slot = shift;
                true
            }
            None => false,
        }
    }
}
