//! Plan catalog and subscription types.
//!
//! A subscription is one purchased plan period for a client. The engine never
//! mutates subscriptions; it reads their cycle boundaries and pricing.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::attendance::CycleRange;
use crate::numeric::{deserialize_lenient, deserialize_lenient_opt};
use crate::{ClientId, PlanId, SubscriptionId};

/// Unit of a plan's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    /// Daily passes.
    Day,
    /// Weekly plans.
    Week,
    /// Monthly plans; the only unit eligible for loyalty rewards.
    Month,
    /// Yearly plans.
    Year,
}

impl DurationUnit {
    /// Get the unit name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// A catalog plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Plan ID.
    pub id: PlanId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Unit of the plan length.
    pub duration_unit: DurationUnit,

    /// Multiplier of `duration_unit` (e.g. 3 months).
    pub duration_count: u32,

    /// Base price before any discount.
    #[serde(deserialize_with = "deserialize_lenient")]
    pub price: f64,
}

impl Plan {
    /// Whether this plan type takes part in the reward program.
    #[must_use]
    pub fn is_monthly(&self) -> bool {
        self.duration_unit == DurationUnit::Month
    }

    /// Inclusive end date of a cycle of this plan starting on `start`.
    ///
    /// Month and year arithmetic clamps to the last day of the target month.
    /// Returns `None` for a zero `duration_count` or on calendar overflow.
    #[must_use]
    pub fn cycle_end(&self, start: NaiveDate) -> Option<NaiveDate> {
        if self.duration_count == 0 {
            return None;
        }
        let count = self.duration_count;
        let exclusive_end = match self.duration_unit {
            DurationUnit::Day => start.checked_add_days(Days::new(u64::from(count))),
            DurationUnit::Week => start.checked_add_days(Days::new(u64::from(count) * 7)),
            DurationUnit::Month => start.checked_add_months(Months::new(count)),
            DurationUnit::Year => start.checked_add_months(Months::new(count.checked_mul(12)?)),
        }?;
        exclusive_end.pred_opt()
    }
}

/// Status of a subscription, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is running.
    Active,

    /// The cycle is over.
    Expired,

    /// Created but not yet paid.
    PendingPayment,
}

impl SubscriptionStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::PendingPayment => "pending_payment",
        }
    }
}

/// One purchased plan period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,

    /// Owning client.
    pub client_id: ClientId,

    /// Purchased plan.
    pub plan_id: PlanId,

    /// First day of the cycle (inclusive).
    pub start_date: NaiveDate,

    /// Last day of the cycle (inclusive).
    pub end_date: NaiveDate,

    /// Current status.
    pub status: SubscriptionStatus,

    /// Price actually charged when a discount was applied at creation.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_price: Option<f64>,
}

impl Subscription {
    /// The cycle covered by this subscription.
    #[must_use]
    pub fn cycle(&self) -> CycleRange {
        CycleRange::new(self.start_date, self.end_date)
    }

    /// Price charged for this subscription: the override if set, else the plan price.
    #[must_use]
    pub fn charged_price(&self, plan: &Plan) -> f64 {
        self.final_price.unwrap_or(plan.price)
    }
}

/// Input for creating a subscription on the remote system.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubscription {
    /// Client buying the plan.
    pub client_id: ClientId,

    /// Plan being bought.
    pub plan_id: PlanId,

    /// First day of the new cycle.
    pub start_date: NaiveDate,

    /// Last day of the new cycle.
    pub end_date: NaiveDate,

    /// Discounted price, when a reward is redeemed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
}
