//! Shift model and related types.
//!
//! This module defines the [`Shift`] record (one clock-in/clock-out interval)
//! and the small set of editing helpers used when a user adjusts a shift's
//! time of day.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a work shift: one continuous clock-in/clock-out interval.
///
/// `clock_out >= clock_in` is a precondition of the calculation path and is
/// not checked there; use [`Shift::validate`] at input boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique, stable identifier for the shift.
    pub id: String,
    /// The identifier of the employee who worked the shift.
    pub employee_id: String,
    /// The instant the employee clocked in.
    pub clock_in: DateTime<Utc>,
    /// The instant the employee clocked out.
    pub clock_out: DateTime<Utc>,
}

/// Selects which end of a shift an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockField {
    /// The clock-in instant.
    ClockIn,
    /// The clock-out instant.
    ClockOut,
}

impl Shift {
    /// Returns the worked duration in milliseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     clock_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     clock_out: Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap(),
    /// };
    /// assert_eq!(shift.duration_ms(), 8 * 3_600_000 + 30 * 60_000);
    /// ```
    pub fn duration_ms(&self) -> i64 {
        (self.clock_out - self.clock_in).num_milliseconds()
    }

    /// Checks the shift's only structural precondition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] when clock-out precedes clock-in.
    pub fn validate(&self) -> EngineResult<()> {
        if self.clock_out < self.clock_in {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!(
                    "clock-out {} precedes clock-in {}",
                    self.clock_out.to_rfc3339(),
                    self.clock_in.to_rfc3339()
                ),
            });
        }
        Ok(())
    }

    /// Returns true if the shift's clock-in falls on `date` in `tz`.
    pub fn starts_on(&self, date: NaiveDate, tz: Tz) -> bool {
        self.clock_in.with_timezone(&tz).date_naive() == date
    }

    /// Replaces the local time of day of one end of the shift, keeping its date.
    ///
    /// Seconds and sub-second parts are reset to zero, matching an
    /// hour/minute time picker. On a daylight-saving overlap the earlier
    /// instant is used; a time inside a daylight-saving gap is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] if `hour`/`minute` are out of
    /// range or the local time does not exist on that date.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{ClockField, Shift};
    /// use chrono::{TimeZone, Utc};
    /// use chrono_tz::Tz;
    ///
    /// let mut shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     clock_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     clock_out: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
    /// };
    /// shift.set_clock_time(ClockField::ClockOut, 18, 15, Tz::UTC).unwrap();
    /// assert_eq!(shift.clock_out, Utc.with_ymd_and_hms(2026, 1, 15, 18, 15, 0).unwrap());
    /// ```
    pub fn set_clock_time(
        &mut self,
        field: ClockField,
        hour: u32,
        minute: u32,
        tz: Tz,
    ) -> EngineResult<()> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!("{hour:02}:{minute:02} is not a valid time of day"),
            }
        })?;

        let target = match field {
            ClockField::ClockIn => &mut self.clock_in,
            ClockField::ClockOut => &mut self.clock_out,
        };
        let local_date = target.with_timezone(&tz).date_naive();

        let updated = match tz.from_local_datetime(&local_date.and_time(time)) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return Err(EngineError::InvalidShift {
                    shift_id: self.id.clone(),
                    message: format!("{local_date} {time} does not exist in {tz}"),
                });
            }
        };

        *target = updated.with_timezone(&Utc);
        Ok(())
    }
}

/// Sums the raw durations of `shifts` in milliseconds.
///
/// This is the "total clocked time" figure: it does not split by day and is
/// unaffected by overtime allocation.
pub fn total_clocked_ms(shifts: &[Shift]) -> i64 {
    shifts.iter().map(Shift::duration_ms).sum()
}
