//! Per-cycle attendance report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attendance::{
    aggregate_cycle_attendance, window_counts, Attendance, AttendanceWindows, CycleRange,
};
use crate::eligibility::{evaluate_eligibility, Eligibility};
use crate::streak::{compute_streaks, Streaks};
use crate::subscription::{Plan, Subscription};
use crate::{ClientId, SubscriptionId};

/// Attendance aggregates and reward verdict for one subscription cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    /// Client the report is for.
    pub client_id: ClientId,

    /// Cycle the report covers.
    pub subscription_id: SubscriptionId,

    /// Cycle boundaries.
    pub cycle: CycleRange,

    /// Check-ins inside the cycle.
    pub cycle_count: usize,

    /// Calendar and rolling window counts, anchored at `today`.
    pub windows: AttendanceWindows,

    /// Consecutive-day streaks over the whole history given.
    pub streaks: Streaks,

    /// Reward eligibility for the cycle.
    pub eligibility: Eligibility,
}

/// Build the report for `subscription` from the client's check-ins.
#[must_use]
pub fn analyze_cycle(
    attendances: &[Attendance],
    subscription: &Subscription,
    plan: &Plan,
    today: NaiveDate,
) -> CycleReport {
    let cycle = subscription.cycle();
    let cycle_count = aggregate_cycle_attendance(attendances, cycle.start, cycle.end);

    CycleReport {
        client_id: subscription.client_id.clone(),
        subscription_id: subscription.id.clone(),
        cycle,
        cycle_count,
        windows: window_counts(attendances, today),
        streaks: compute_streaks(attendances, today),
        eligibility: evaluate_eligibility(cycle_count, plan.duration_unit, cycle.end, today),
    }
}
