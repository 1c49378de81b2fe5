//! Splitting worked time into calendar days.
//!
//! This module cuts shifts at local midnight and accumulates the pieces into
//! one duration bucket per calendar day, so the part of an overnight shift
//! worked after midnight counts towards the next day.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::Shift;

/// The portion of a shift that falls within a single calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ShiftSegment, segment_by_day};
/// use payroll_engine::models::Shift;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use chrono_tz::Tz;
///
/// let shift = Shift {
///     id: "1".to_string(),
///     employee_id: "1".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2023, 2, 3, 23, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2023, 2, 4, 11, 0, 0).unwrap(),
/// };
///
/// let first = ShiftSegment {
///     date: NaiveDate::from_ymd_opt(2023, 2, 3).unwrap(),
///     start: shift.clock_in,
///     end: Utc.with_ymd_and_hms(2023, 2, 4, 0, 0, 0).unwrap(),
///     duration_ms: 3_600_000,
/// };
/// assert_eq!(segment_by_day(&shift, Tz::UTC)[0], first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSegment {
    /// The local calendar date this segment belongs to.
    pub date: NaiveDate,
    /// The start of the segment.
    pub start: DateTime<Utc>,
    /// The end of the segment (a local midnight or the clock-out).
    pub end: DateTime<Utc>,
    /// Worked milliseconds within the segment.
    pub duration_ms: i64,
}

/// Milliseconds worked on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDuration {
    /// The local calendar date.
    pub date: NaiveDate,
    /// Milliseconds worked on that date across all shifts.
    pub duration_ms: i64,
}

/// Cuts a shift at every local midnight it crosses.
///
/// A shift within one calendar day (including a zero-length shift) yields
/// exactly one segment. A shift crossing `n` midnights yields `n + 1`
/// segments whose durations sum to the shift's duration. When a midnight
/// falls inside a daylight-saving gap the cut is placed at the first local
/// instant after the gap.
///
/// A shift whose clock-out precedes its clock-in violates the model's
/// precondition; it yields a single segment on the clock-in day carrying the
/// (negative) duration unchanged.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::segment_by_day;
/// use payroll_engine::models::Shift;
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::Tz;
///
/// let shift = Shift {
///     id: "1".to_string(),
///     employee_id: "1".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2023, 2, 3, 23, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2023, 2, 4, 11, 0, 0).unwrap(),
/// };
///
/// let segments = segment_by_day(&shift, Tz::UTC);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].duration_ms, 3_600_000); // 1 hour on Feb 3
/// assert_eq!(segments[1].duration_ms, 39_600_000); // 11 hours on Feb 4
/// ```
pub fn segment_by_day(shift: &Shift, tz: Tz) -> Vec<ShiftSegment> {
    let shift_end = shift.clock_out;
    let mut current_start = shift.clock_in;

    if shift_end <= current_start {
        return vec![ShiftSegment {
            date: local_date(current_start, tz),
            start: current_start,
            end: shift_end,
            duration_ms: (shift_end - current_start).num_milliseconds(),
        }];
    }

    let mut segments = Vec::new();
    while current_start < shift_end {
        let date = local_date(current_start, tz);

        // Segment ends at either midnight or shift end, whichever is first
        let segment_end = next_local_midnight(current_start, tz)
            .filter(|midnight| *midnight > current_start && *midnight < shift_end)
            .unwrap_or(shift_end);

        segments.push(ShiftSegment {
            date,
            start: current_start,
            end: segment_end,
            duration_ms: (segment_end - current_start).num_milliseconds(),
        });

        current_start = segment_end;
    }

    segments
}

/// Accumulates an employee's shifts into per-day durations.
///
/// The result holds one entry per calendar day touched by at least one
/// shift, in chronological order. Time worked after midnight is carried into
/// the following day's entry.
///
/// `shifts` are expected in ascending clock-in order, as produced by
/// [`group_employee_shifts`](super::group_employee_shifts).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::split_into_days;
/// use payroll_engine::models::Shift;
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::Tz;
///
/// let shift = |id: &str, from: (u32, u32), to: (u32, u32)| Shift {
///     id: id.to_string(),
///     employee_id: "1".to_string(),
///     clock_in: Utc.with_ymd_and_hms(2026, 1, from.0, from.1, 0, 0).unwrap(),
///     clock_out: Utc.with_ymd_and_hms(2026, 1, to.0, to.1, 0, 0).unwrap(),
/// };
///
/// let days = split_into_days(
///     &[shift("a", (15, 20), (16, 2)), shift("b", (16, 9), (16, 12))],
///     Tz::UTC,
/// );
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[0].duration_ms, 4 * 3_600_000);
/// assert_eq!(days[1].duration_ms, 5 * 3_600_000); // 2h carried + 3h
/// ```
pub fn split_into_days(shifts: &[Shift], tz: Tz) -> Vec<DayDuration> {
    let mut days: Vec<DayDuration> = Vec::new();

    for shift in shifts {
        for segment in segment_by_day(shift, tz) {
            add_to_day(&mut days, segment.date, segment.duration_ms);
        }
    }

    days
}

fn add_to_day(days: &mut Vec<DayDuration>, date: NaiveDate, duration_ms: i64) {
    // Ordered input almost always hits the last bucket
    if let Some(last) = days.last_mut() {
        if last.date == date {
            last.duration_ms += duration_ms;
            return;
        }
    }

    match days.binary_search_by_key(&date, |day| day.date) {
        Ok(index) => days[index].duration_ms += duration_ms,
        Err(index) => days.insert(index, DayDuration { date, duration_ms }),
    }
}

fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Returns the first instant of the local day after the one containing `instant`.
fn next_local_midnight(instant: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let next_day = local_date(instant, tz).succ_opt()?;
    let midnight = next_day.and_time(NaiveTime::MIN);

    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            // Midnight skipped by a DST jump: the jump instant is midnight read
            // with the offset in force before it.
            let offset_before = tz.offset_from_utc_datetime(&instant.naive_utc()).fix();
            let seconds = i64::from(offset_before.local_minus_utc());
            Some((midnight - Duration::seconds(seconds)).and_utc())
        }
    }
}
