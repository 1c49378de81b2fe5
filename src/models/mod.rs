//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod change_set;
mod employee;
mod shift;
mod snapshot;
mod time_info;

pub use change_set::ChangeSet;
pub use employee::{Employee, EmployeeWithShifts};
pub use shift::{ClockField, Shift, total_clocked_ms};
pub use snapshot::Snapshot;
pub use time_info::{
    EmployeeSummary, EmployeeTimeInfo, MS_PER_HOUR, PayrollTotals, hours_to_ms, ms_to_hours,
};
