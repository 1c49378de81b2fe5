//! Calculation logic for the payroll engine.
//!
//! This module contains the read path: grouping shifts by employee,
//! splitting worked time into calendar days at local midnight, allocating
//! each day's time into regular and overtime under the daily threshold, and
//! aggregating the result into amounts owed. Every function here is pure.

mod day_split;
mod grouping;
mod overtime;
mod payroll;

pub use day_split::{DayDuration, ShiftSegment, segment_by_day, split_into_days};
pub use grouping::group_employee_shifts;
pub use overtime::{
    TimeSplit, allocate_day, allocate_overtime, compute_time_info, employee_time_info,
};
pub use payroll::{compute_payroll_totals, summarize_employees};
