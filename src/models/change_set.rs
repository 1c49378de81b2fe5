//! Change sets produced by comparing an original and an edited snapshot.

use serde::{Deserialize, Serialize};

use super::{Employee, Shift};

/// The employee and shift records whose persisted fields were edited.
///
/// Records carry their edited values and are listed in the iteration order
/// of the original snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Edited employee records.
    pub employees: Vec<Employee>,
    /// Edited shift records.
    pub shifts: Vec<Shift>,
}

impl ChangeSet {
    /// Returns true if nothing needs to be written.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty() && self.shifts.is_empty()
    }

    /// Number of individual store updates this change set requires.
    pub fn len(&self) -> usize {
        self.employees.len() + self.shifts.len()
    }
}
