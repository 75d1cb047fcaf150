//! Core rules for the gym loyalty program.
//!
//! This crate holds the decision logic of the gym console, computed purely
//! from records fetched from the remote gym API:
//!
//! - **Identifiers**: `ClientId`, `SubscriptionId`, `PlanId`, `RewardId`, `AttendanceId`
//! - **Attendance**: cycle counts and calendar/rolling window counts
//! - **Streaks**: current and longest runs of consecutive check-in days
//! - **Eligibility**: whether a monthly cycle earned a reward
//! - **Rewards**: lifecycle, lazy expiry, soonest-expiring selection
//! - **Pricing**: discounted prices and apply-input validation
//! - **Redemption**: purchase and claim flows over a [`RewardGateway`]
//!
//! # Reward program
//!
//! **20 check-ins inside a finished monthly cycle earn one discount reward.**
//!
//! - Only plans whose declared unit is `month` take part
//! - A reward is usable while `pending` and not past `expires_at`
//! - Expiry is evaluated at read time; nothing is ever swept

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attendance;
pub mod eligibility;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod pricing;
pub mod redemption;
pub mod report;
pub mod reward;
pub mod streak;
pub mod subscription;
pub mod timestamp;

pub use attendance::{
    aggregate_cycle_attendance, window_counts, Attendance, AttendanceWindows, CycleRange,
};
pub use eligibility::{
    evaluate_eligibility, Eligibility, IneligibleReason, REWARD_ATTENDANCE_THRESHOLD,
};
pub use error::{LoyaltyError, Result};
pub use ids::{AttendanceId, ClientId, IdError, PlanId, RewardId, SubscriptionId};
pub use numeric::{coerce, Numeric};
pub use pricing::{
    price_with_discount, round_cents, validate_apply_input, validate_discount_percentage,
    ApplyRewardRequest, DiscountedPrice,
};
pub use redemption::{
    claim_reward, purchase_subscription, PurchaseOutcome, PurchaseRequest, RewardGateway,
};
pub use report::{analyze_cycle, CycleReport};
pub use reward::{available_rewards, select_best_reward, Availability, Reward, RewardStatus};
pub use streak::{compute_streaks, Streaks};
pub use subscription::{DurationUnit, NewSubscription, Plan, Subscription, SubscriptionStatus};
pub use timestamp::parse_timestamp;
