//! Loyalty reward lifecycle.
//!
//! States are `pending -> applied` (one-way) and `pending -> expired`. Expiry
//! is never written back: a pending reward whose `expires_at` has passed is
//! treated exactly like a stored `expired` one, and the check is redone on
//! every read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LoyaltyError, Result};
use crate::numeric::deserialize_lenient;
use crate::timestamp::{deserialize_utc, deserialize_utc_opt};
use crate::{ClientId, RewardId, SubscriptionId};

/// Stored status of a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStatus {
    /// Earned and not yet used.
    Pending,
    /// Redeemed against a subscription.
    Applied,
    /// Marked expired by the remote system.
    Expired,
}

/// Behavioural state of a reward at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Can be applied to a new subscription.
    Available,
    /// Already used.
    Applied,
    /// Stored as expired, or past `expires_at`.
    Expired,
}

/// A discount earned by attending enough in one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Reward ID.
    pub id: RewardId,

    /// The cycle that earned it.
    pub subscription_id: SubscriptionId,

    /// Owning client.
    pub client_id: ClientId,

    /// Cycle check-in count captured when the reward was calculated.
    pub attendance_count: u32,

    /// Discount in percent. Fixed for the life of the reward.
    #[serde(deserialize_with = "deserialize_lenient")]
    pub discount_percentage: f64,

    /// Date the reward was earned.
    pub eligible_date: NaiveDate,

    /// After this instant the reward can no longer be applied.
    #[serde(deserialize_with = "deserialize_utc")]
    pub expires_at: DateTime<Utc>,

    /// Stored status.
    pub status: RewardStatus,

    /// When the reward was applied.
    #[serde(
        default,
        deserialize_with = "deserialize_utc_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub applied_at: Option<DateTime<Utc>>,

    /// Subscription the reward was applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_subscription_id: Option<SubscriptionId>,
}

impl Reward {
    /// Classify the reward at `now`.
    #[must_use]
    pub fn availability(&self, now: DateTime<Utc>) -> Availability {
        match self.status {
            RewardStatus::Applied => Availability::Applied,
            RewardStatus::Expired => Availability::Expired,
            RewardStatus::Pending if self.expires_at < now => Availability::Expired,
            RewardStatus::Pending => Availability::Available,
        }
    }

    /// Pending and not past `expires_at`.
    #[must_use]
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.availability(now) == Availability::Available
    }

    /// Re-check availability right before the reward is used.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::RewardUnavailable`] if the reward was applied or
    /// has expired since it was last read.
    pub fn ensure_available(&self, now: DateTime<Utc>) -> Result<()> {
        let reason = match self.availability(now) {
            Availability::Available => return Ok(()),
            Availability::Applied => "already applied",
            Availability::Expired => "expired",
        };
        tracing::warn!(reward_id = %self.id, reason, "Reward no longer available");
        Err(LoyaltyError::RewardUnavailable {
            reward_id: self.id.to_string(),
            reason: reason.to_string(),
        })
    }

    /// Record a confirmed redemption on this copy of the reward.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::RewardUnavailable`] unless the reward is
    /// available at `at`; an applied reward is never re-applied.
    pub fn mark_applied(
        &mut self,
        subscription_id: SubscriptionId,
        at: DateTime<Utc>,
    ) -> Result<()> {
        self.ensure_available(at)?;
        self.status = RewardStatus::Applied;
        self.applied_at = Some(at);
        self.applied_subscription_id = Some(subscription_id);
        Ok(())
    }
}

/// All available rewards, soonest-expiring first.
#[must_use]
pub fn available_rewards(rewards: &[Reward], now: DateTime<Utc>) -> Vec<&Reward> {
    let mut available: Vec<&Reward> = rewards.iter().filter(|r| r.is_available(now)).collect();
    available.sort_by_key(|r| r.expires_at);
    available
}

/// The available reward closest to expiry, if any.
#[must_use]
pub fn select_best_reward(rewards: &[Reward], now: DateTime<Utc>) -> Option<&Reward> {
    rewards
        .iter()
        .filter(|r| r.is_available(now))
        .min_by_key(|r| r.expires_at)
}
