//! Consecutive-day attendance streaks.
//!
//! Check-ins are reduced to distinct calendar dates before walking, so a
//! second check-in on the same day neither extends nor breaks a run.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attendance::Attendance;

/// Current and longest runs of consecutive calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Run ending today; zero unless the latest check-in is today.
    pub current: usize,
    /// Longest run anywhere in the history.
    pub longest: usize,
}

/// Compute streaks from check-ins in any order.
#[must_use]
pub fn compute_streaks(attendances: &[Attendance], today: NaiveDate) -> Streaks {
    let dates: BTreeSet<NaiveDate> = attendances.iter().map(Attendance::date).collect();
    let mut descending = dates.into_iter().rev();

    let Some(latest) = descending.next() else {
        return Streaks::default();
    };

    let mut longest = 1;
    let mut run = 1;
    let mut leading_run = None;
    let mut previous = latest;

    for date in descending {
        if (previous - date).num_days() == 1 {
            run += 1;
        } else {
            leading_run.get_or_insert(run);
            run = 1;
        }
        longest = longest.max(run);
        previous = date;
    }
    let leading_run = leading_run.unwrap_or(run);

    Streaks {
        current: if latest == today { leading_run } else { 0 },
        longest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::tests::{check_in, date, on_days};

    const TODAY: (i32, u32, u32) = (2026, 10, 18);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    fn days_ago(n: u64) -> NaiveDate {
        today() - chrono::Days::new(n)
    }

    #[test]
    fn no_check_ins() {
        assert_eq!(compute_streaks(&[], today()), Streaks::default());
    }

    #[test]
    fn single_check_in_today() {
        let s = compute_streaks(&on_days(&[today()]), today());
        assert_eq!(s, Streaks { current: 1, longest: 1 });
    }

    #[test]
    fn single_check_in_yesterday_has_no_current() {
        let s = compute_streaks(&on_days(&[days_ago(1)]), today());
        assert_eq!(s, Streaks { current: 0, longest: 1 });
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let s = compute_streaks(&on_days(&[days_ago(2), today(), days_ago(1)]), today());
        assert_eq!(s.current, 3);
        assert_eq!(s.longest, 3);
    }

    #[test]
    fn gap_breaks_the_run() {
        let s = compute_streaks(&on_days(&[today(), days_ago(5)]), today());
        assert_eq!(s, Streaks { current: 1, longest: 1 });
    }

    #[test]
    fn longest_run_in_the_past() {
        let s = compute_streaks(
            &on_days(&[
                today(),
                days_ago(1),
                days_ago(10),
                days_ago(11),
                days_ago(12),
                days_ago(13),
            ]),
            today(),
        );
        assert_eq!(s, Streaks { current: 2, longest: 4 });
    }

    #[test]
    fn same_day_duplicates_do_not_truncate() {
        let list = vec![
            check_in(0, today(), 7),
            check_in(1, today(), 19),
            check_in(2, days_ago(1), 8),
            check_in(3, days_ago(1), 20),
            check_in(4, days_ago(2), 9),
        ];
        let s = compute_streaks(&list, today());
        assert_eq!(s, Streaks { current: 3, longest: 3 });
    }
}
