//! Daily overtime allocation.
//!
//! This module splits each calendar day's worked time into regular time (up
//! to the daily threshold) and overtime (everything above it), and reduces
//! the per-day splits into per-employee totals.

use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::models::{Employee, EmployeeTimeInfo, EmployeeWithShifts, Shift};

use super::day_split::{DayDuration, split_into_days};
use super::grouping::group_employee_shifts;

/// Regular and overtime milliseconds.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::TimeSplit;
///
/// let split = TimeSplit { regular_ms: 28_800_000, overtime_ms: 7_200_000 };
/// assert_eq!(split.total_ms(), 36_000_000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSplit {
    /// Milliseconds at or below the daily threshold.
    pub regular_ms: i64,
    /// Milliseconds above the daily threshold.
    pub overtime_ms: i64,
}

impl TimeSplit {
    /// Regular plus overtime milliseconds.
    pub fn total_ms(&self) -> i64 {
        self.regular_ms + self.overtime_ms
    }
}

impl std::ops::Add for TimeSplit {
    type Output = TimeSplit;

    fn add(self, rhs: TimeSplit) -> TimeSplit {
        TimeSplit {
            regular_ms: self.regular_ms + rhs.regular_ms,
            overtime_ms: self.overtime_ms + rhs.overtime_ms,
        }
    }
}

/// Splits one day's worked time at the daily threshold.
///
/// A day under the threshold is all regular time; otherwise exactly
/// `threshold_ms` is regular and the remainder is overtime.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::allocate_day;
/// use payroll_engine::models::hours_to_ms;
///
/// let split = allocate_day(hours_to_ms(11), hours_to_ms(8));
/// assert_eq!(split.regular_ms, hours_to_ms(8));
/// assert_eq!(split.overtime_ms, hours_to_ms(3));
///
/// let split = allocate_day(hours_to_ms(6), hours_to_ms(8));
/// assert_eq!(split.regular_ms, hours_to_ms(6));
/// assert_eq!(split.overtime_ms, 0);
/// ```
pub fn allocate_day(duration_ms: i64, threshold_ms: i64) -> TimeSplit {
    if duration_ms < threshold_ms {
        TimeSplit {
            regular_ms: duration_ms,
            overtime_ms: 0,
        }
    } else {
        TimeSplit {
            regular_ms: threshold_ms,
            overtime_ms: duration_ms - threshold_ms,
        }
    }
}

/// Applies [`allocate_day`] to every day and sums the results.
///
/// The cap is per day only; no weekly or rolling-window accounting is done.
pub fn allocate_overtime(days: &[DayDuration], threshold_ms: i64) -> TimeSplit {
    days.iter()
        .map(|day| allocate_day(day.duration_ms, threshold_ms))
        .fold(TimeSplit::default(), |acc, split| acc + split)
}

/// Computes regular and overtime for one employee's ordered shifts.
pub fn employee_time_info(employee: &EmployeeWithShifts, rules: &PayrollRules) -> EmployeeTimeInfo {
    let days = split_into_days(&employee.shifts, rules.timezone);
    let split = allocate_overtime(&days, rules.daily_threshold_ms);

    EmployeeTimeInfo {
        employee: employee.employee.clone(),
        regular_ms: split.regular_ms,
        overtime_ms: split.overtime_ms,
    }
}

/// Computes regular and overtime for every employee.
///
/// Groups `shifts` by employee, splits each employee's time into calendar
/// days and allocates overtime per day. Results follow the order of
/// `employees`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_time_info;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Employee, Shift, hours_to_ms};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "1".to_string(),
///     name: "Name".to_string(),
///     email: "test@test.test".to_string(),
///     hourly_rate: Decimal::from(2),
///     hourly_rate_overtime: Decimal::from(1),
/// };
/// let shift = Shift {
///     id: "1".to_string(),
///     employee_id: "1".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2023, 2, 3, 23, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2023, 2, 4, 11, 0, 0).unwrap(),
/// };
///
/// let info = compute_time_info(&[employee], &[shift], &PayrollRules::default());
/// assert_eq!(info[0].regular_ms, hours_to_ms(9));
/// assert_eq!(info[0].overtime_ms, hours_to_ms(3));
/// ```
pub fn compute_time_info(
    employees: &[Employee],
    shifts: &[Shift],
    rules: &PayrollRules,
) -> Vec<EmployeeTimeInfo> {
    group_employee_shifts(employees, shifts, None)
        .iter()
        .map(|employee| employee_time_info(employee, rules))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DAILY_THRESHOLD_MS;
    use crate::models::hours_to_ms;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn day(date: &str, duration_ms: i64) -> DayDuration {
        DayDuration {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            duration_ms,
        }
    }

    fn shift(id: &str, clock_in: &str, clock_out: &str) -> Shift {
        let parse = |s: &str| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
                .unwrap()
                .and_utc()
        };
        Shift {
            id: id.to_string(),
            employee_id: "1".to_string(),
            clock_in: parse(clock_in),
            clock_out: parse(clock_out),
        }
    }

    fn employee() -> Employee {
        Employee {
            id: "1".to_string(),
            name: "Name".to_string(),
            email: "test@test.test".to_string(),
            hourly_rate: Decimal::from(2),
            hourly_rate_overtime: Decimal::from(1),
        }
    }

    // ==========================================================================
    // OT-001: exactly at threshold - no overtime
    // ==========================================================================
    #[test]
    fn test_ot_001_exactly_threshold_no_overtime() {
        let split = allocate_day(hours_to_ms(8), DEFAULT_DAILY_THRESHOLD_MS);

        assert_eq!(split.regular_ms, hours_to_ms(8));
        assert_eq!(split.overtime_ms, 0);
    }

    // ==========================================================================
    // OT-002: 10 hours - 2 hours overtime
    // ==========================================================================
    #[test]
    fn test_ot_002_ten_hours_two_overtime() {
        let split = allocate_day(hours_to_ms(10), DEFAULT_DAILY_THRESHOLD_MS);

        assert_eq!(split.regular_ms, hours_to_ms(8));
        assert_eq!(split.overtime_ms, hours_to_ms(2));
    }

    // ==========================================================================
    // OT-003: one millisecond over
    // ==========================================================================
    #[test]
    fn test_ot_003_one_millisecond_over() {
        let split = allocate_day(DEFAULT_DAILY_THRESHOLD_MS + 1, DEFAULT_DAILY_THRESHOLD_MS);

        assert_eq!(split.regular_ms, DEFAULT_DAILY_THRESHOLD_MS);
        assert_eq!(split.overtime_ms, 1);
    }

    #[test]
    fn test_zero_day() {
        assert_eq!(allocate_day(0, DEFAULT_DAILY_THRESHOLD_MS), TimeSplit::default());
    }

    #[test]
    fn test_cap_is_per_day_not_cumulative() {
        // five 7h days: 35h, no overtime even though it exceeds 8h in total
        let days: Vec<DayDuration> = (12..=16)
            .map(|d| day(&format!("2026-01-{d}"), hours_to_ms(7)))
            .collect();

        let split = allocate_overtime(&days, DEFAULT_DAILY_THRESHOLD_MS);

        assert_eq!(split.regular_ms, hours_to_ms(35));
        assert_eq!(split.overtime_ms, 0);
    }

    #[test]
    fn test_custom_threshold() {
        let split = allocate_overtime(
            &[day("2026-01-15", hours_to_ms(12))],
            hours_to_ms(10),
        );

        assert_eq!(split.regular_ms, hours_to_ms(10));
        assert_eq!(split.overtime_ms, hours_to_ms(2));
    }

    /// The overnight example: 23:00 -> 11:00 is 1h + 11h, so 9h regular and 3h overtime.
    #[test]
    fn test_overnight_shift_time_info() {
        let info = compute_time_info(
            &[employee()],
            &[shift("1", "2023-02-03 23:00", "2023-02-04 11:00")],
            &PayrollRules::default(),
        );

        assert_eq!(info.len(), 1);
        assert_eq!(info[0].employee.id, "1");
        assert_eq!(info[0].regular_ms, hours_to_ms(9));
        assert_eq!(info[0].overtime_ms, hours_to_ms(3));
    }

    #[test]
    fn test_unsorted_input_is_grouped_before_splitting() {
        let info = compute_time_info(
            &[employee()],
            &[
                shift("day", "2026-01-16 14:00", "2026-01-16 20:00"),
                shift("night", "2026-01-15 22:00", "2026-01-16 05:00"),
            ],
            &PayrollRules::default(),
        );

        // Jan 15: 2h; Jan 16: 5h + 6h = 11h -> 8h regular + 3h overtime
        assert_eq!(info[0].regular_ms, hours_to_ms(10));
        assert_eq!(info[0].overtime_ms, hours_to_ms(3));
    }

    #[test]
    fn test_employee_without_shifts_has_zero_time() {
        let info = compute_time_info(&[employee()], &[], &PayrollRules::default());

        assert_eq!(info[0].regular_ms, 0);
        assert_eq!(info[0].overtime_ms, 0);
    }

    proptest! {
        #[test]
        fn prop_regular_plus_overtime_equals_worked(
            durations in prop::collection::vec(0i64..hours_to_ms(30), 0..40),
            threshold in 1i64..hours_to_ms(24),
        ) {
            let days: Vec<DayDuration> = durations
                .iter()
                .enumerate()
                .map(|(i, ms)| DayDuration {
                    date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Days::new(i as u64),
                    duration_ms: *ms,
                })
                .collect();

            let split = allocate_overtime(&days, threshold);

            prop_assert_eq!(split.total_ms(), durations.iter().sum::<i64>());
            prop_assert!(split.overtime_ms >= 0);
        }

        #[test]
        fn prop_short_days_never_produce_overtime(
            duration in 0i64..DEFAULT_DAILY_THRESHOLD_MS,
        ) {
            let split = allocate_day(duration, DEFAULT_DAILY_THRESHOLD_MS);
            prop_assert_eq!(split.overtime_ms, 0);
            prop_assert_eq!(split.regular_ms, duration);
        }
    }
}
