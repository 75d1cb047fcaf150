//! Loyalty reward eligibility rules.
//!
//! A cycle earns a reward when all of the following hold:
//!
//! 1. The plan's declared unit is `month`.
//! 2. The cycle has ended (`end_date <= today`; ending today counts).
//! 3. The client checked in at least [`REWARD_ATTENDANCE_THRESHOLD`] times
//!    inside the cycle.
//!
//! The evaluator only decides. Creating the reward belongs to the remote
//! system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::subscription::DurationUnit;

/// Check-ins required within one monthly cycle to earn a reward.
pub const REWARD_ATTENDANCE_THRESHOLD: usize = 20;

/// The first rule a cycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// Only monthly plans take part in the program.
    NotMonthly,
    /// The cycle has not finished yet.
    CycleNotEnded,
    /// Too few check-ins.
    BelowThreshold,
}

impl IneligibleReason {
    /// Operator-facing description.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotMonthly => "only monthly plans earn loyalty rewards",
            Self::CycleNotEnded => "the cycle has not ended yet",
            Self::BelowThreshold => "not enough check-ins in the cycle",
        }
    }
}

/// Outcome of evaluating one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Whether a reward may be calculated for the cycle.
    pub eligible: bool,

    /// Check-ins observed in the cycle.
    pub attendance_count: usize,

    /// Check-ins still missing to reach the threshold, floored at zero.
    pub shortfall: usize,

    /// Why the cycle is not eligible, if it is not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibleReason>,
}

/// Decide whether a cycle earned a reward.
#[must_use]
pub fn evaluate_eligibility(
    attendance_count: usize,
    duration_unit: DurationUnit,
    cycle_end: NaiveDate,
    today: NaiveDate,
) -> Eligibility {
    let shortfall = REWARD_ATTENDANCE_THRESHOLD.saturating_sub(attendance_count);

    let reason = if duration_unit != DurationUnit::Month {
        Some(IneligibleReason::NotMonthly)
    } else if cycle_end > today {
        Some(IneligibleReason::CycleNotEnded)
    } else if shortfall > 0 {
        Some(IneligibleReason::BelowThreshold)
    } else {
        None
    };

    tracing::debug!(
        attendance_count,
        shortfall,
        unit = duration_unit.as_str(),
        %cycle_end,
        ?reason,
        "Evaluated reward eligibility"
    );

    Eligibility {
        eligible: reason.is_none(),
        attendance_count,
        shortfall,
        reason,
    }
}
