//! Check-in records and cycle attendance aggregation.
//!
//! Cycle bounds are calendar dates and both ends are inclusive. A check-in is
//! placed on the calendar date of its own timestamp, in whatever offset the
//! API encoded; no timezone normalization is done here.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::timestamp::deserialize_offset;
use crate::{AttendanceId, ClientId};

/// One check-in event. Immutable once created by the check-in flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    /// Attendance ID.
    pub id: AttendanceId,

    /// Client who checked in.
    pub client_id: ClientId,

    /// When the check-in happened. Sent without an offset, it counts as UTC.
    #[serde(deserialize_with = "deserialize_offset")]
    pub check_in: DateTime<FixedOffset>,
}

impl Attendance {
    /// Calendar date of the check-in.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.check_in.date_naive()
    }
}

/// The date range `[start, end]` of one subscription period.
///
/// Callers pass well-formed cycles; `end < start` is not rejected and simply
/// contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl CycleRange {
    /// Create a cycle range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the cycle.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether the cycle spans 28 to 31 days.
    ///
    /// Reward eligibility goes by the plan's declared unit; this day-count
    /// guess disagrees with it for irregular start and end dates.
    #[deprecated(note = "use Plan::is_monthly; the day count does not decide eligibility")]
    #[must_use]
    pub fn spans_monthly_days(&self) -> bool {
        (28..=31).contains(&self.length_days())
    }
}

/// Count check-ins whose date falls within `[cycle_start, cycle_end]`.
#[must_use]
pub fn aggregate_cycle_attendance(
    attendances: &[Attendance],
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
) -> usize {
    let cycle = CycleRange::new(cycle_start, cycle_end);
    attendances.iter().filter(|a| cycle.contains(a.date())).count()
}

/// Check-in counts over rolling and calendar windows anchored at `today`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceWindows {
    /// Current calendar week, Monday through Sunday.
    pub this_week: usize,
    /// Current calendar month.
    pub this_month: usize,
    /// `today` and the six days before it.
    pub last_7_days: usize,
    /// `today` and the 29 days before it.
    pub last_30_days: usize,
}

/// Compute window counts, independent of any subscription cycle.
#[must_use]
pub fn window_counts(attendances: &[Attendance], today: NaiveDate) -> AttendanceWindows {
    let week = today.week(Weekday::Mon);
    let this_week = CycleRange::new(week.first_day(), week.last_day());
    let last_7 = trailing_days(today, 7);
    let last_30 = trailing_days(today, 30);

    attendances
        .iter()
        .map(Attendance::date)
        .fold(AttendanceWindows::default(), |mut acc, date| {
            if this_week.contains(date) {
                acc.this_week += 1;
            }
            if date.year() == today.year() && date.month() == today.month() {
                acc.this_month += 1;
            }
            if last_7.contains(date) {
                acc.last_7_days += 1;
            }
            if last_30.contains(date) {
                acc.last_30_days += 1;
            }
            acc
        })
}

/// `[today - (days - 1), today]`.
fn trailing_days(today: NaiveDate, days: u64) -> CycleRange {
    let start = today
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(NaiveDate::MIN);
    CycleRange::new(start, today)
}
