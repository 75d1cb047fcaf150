//! Reward claiming and redemption against the remote gym system.
//!
//! The engine owns no state. Writes go through a [`RewardGateway`] and the
//! remote system stays the source of truth. A failed reward application after
//! the subscription was created is a warning, not a rollback: the price is
//! already committed and the reward stays pending for a retry or a manual fix.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{LoyaltyError, Result};
use crate::pricing::{
    price_with_discount, validate_discount_percentage, ApplyRewardRequest, DiscountedPrice,
};
use crate::report::CycleReport;
use crate::reward::Reward;
use crate::subscription::{NewSubscription, Plan, Subscription};
use crate::{ClientId, SubscriptionId};

/// Remote operations the redemption flow depends on.
#[async_trait]
pub trait RewardGateway: Send + Sync {
    /// Create a subscription.
    async fn create_subscription(&self, input: &NewSubscription) -> Result<Subscription>;

    /// Attach a reward to a subscription; returns the reward as now stored.
    async fn apply_reward(&self, request: &ApplyRewardRequest) -> Result<Reward>;

    /// Ask the remote system to create the reward earned by a cycle.
    async fn calculate_reward(&self, subscription_id: &SubscriptionId) -> Result<Reward>;
}

/// A plan purchase, optionally paid for partly with a reward.
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    /// Buyer.
    pub client_id: ClientId,
    /// Plan being bought.
    pub plan: Plan,
    /// First day of the new cycle.
    pub start_date: NaiveDate,
}

/// Result of a purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOutcome {
    /// The subscription as created remotely.
    pub subscription: Subscription,

    /// Price charged and savings.
    pub price: DiscountedPrice,

    /// The reward after a successful application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_reward: Option<Reward>,

    /// Set when the subscription stands but the reward could not be applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PurchaseOutcome {
    /// Whether a reward was attached to the new subscription.
    #[must_use]
    pub fn reward_applied(&self) -> bool {
        self.applied_reward.is_some()
    }
}

/// Create a subscription, redeeming `reward` against it if given.
///
/// The reward's availability and discount are checked immediately before any
/// remote call, never trusted from an earlier read.
///
/// # Errors
///
/// - [`LoyaltyError::RewardUnavailable`] if the reward is applied, expired, or
///   belongs to another client.
/// - [`LoyaltyError::InvalidDiscount`] if the reward's percentage is out of range.
/// - [`LoyaltyError::InvalidPlan`] if the plan cannot produce a cycle.
/// - Any error from creating the subscription.
///
/// A failure while applying the reward is not an error; see
/// [`PurchaseOutcome::warning`].
pub async fn purchase_subscription<G>(
    gateway: &G,
    request: &PurchaseRequest,
    reward: Option<&Reward>,
    now: DateTime<Utc>,
) -> Result<PurchaseOutcome>
where
    G: RewardGateway + ?Sized,
{
    let plan = &request.plan;
    let end_date = plan
        .cycle_end(request.start_date)
        .ok_or_else(|| LoyaltyError::InvalidPlan {
            plan_id: plan.id.to_string(),
            reason: "duration does not produce an end date".to_string(),
        })?;

    // Everything the apply call needs except the new subscription id is
    // checked here, before the first remote write.
    let redemption = match reward {
        Some(reward) => {
            reward.ensure_available(now)?;
            if reward.client_id != request.client_id {
                return Err(LoyaltyError::RewardUnavailable {
                    reward_id: reward.id.to_string(),
                    reason: format!("belongs to client {}", reward.client_id),
                });
            }
            let percentage = validate_discount_percentage(reward.discount_percentage)?;
            Some((reward, percentage))
        }
        None => None,
    };
    let price = price_with_discount(plan.price, redemption.map_or(0.0, |(_, pct)| pct));

    let input = NewSubscription {
        client_id: request.client_id.clone(),
        plan_id: plan.id.clone(),
        start_date: request.start_date,
        end_date,
        final_price: redemption.map(|_| price.final_price),
    };
    let subscription = gateway.create_subscription(&input).await?;

    tracing::info!(
        client_id = %request.client_id,
        subscription_id = %subscription.id,
        final_price = price.final_price,
        "Subscription created"
    );

    let Some((reward, discount_percentage)) = redemption else {
        return Ok(PurchaseOutcome {
            subscription,
            price,
            applied_reward: None,
            warning: None,
        });
    };

    let apply = ApplyRewardRequest {
        reward_id: reward.id.clone(),
        subscription_id: subscription.id.clone(),
        discount_percentage,
    };

    match gateway.apply_reward(&apply).await {
        Ok(applied) => {
            tracing::info!(
                reward_id = %reward.id,
                subscription_id = %subscription.id,
                saved = price.saved_amount,
                "Reward applied"
            );
            Ok(PurchaseOutcome {
                subscription,
                price,
                applied_reward: Some(applied),
                warning: None,
            })
        }
        Err(e) => {
            tracing::warn!(
                reward_id = %reward.id,
                subscription_id = %subscription.id,
                error = %e,
                "Subscription created but reward could not be applied"
            );
            Ok(PurchaseOutcome {
                warning: Some(format!(
                    "Subscription {} was created with the discounted price, but reward {} could not be applied: {e}",
                    subscription.id, reward.id
                )),
                subscription,
                price,
                applied_reward: None,
            })
        }
    }
}

/// Ask the remote system to create a reward for an eligible cycle.
///
/// Returns `Ok(None)` without any remote call when the cycle is not eligible.
///
/// # Errors
///
/// Returns any error from the gateway.
pub async fn claim_reward<G>(gateway: &G, report: &CycleReport) -> Result<Option<Reward>>
where
    G: RewardGateway + ?Sized,
{
    if !report.eligibility.eligible {
        tracing::debug!(
            subscription_id = %report.subscription_id,
            shortfall = report.eligibility.shortfall,
            "Cycle not eligible - no reward requested"
        );
        return Ok(None);
    }

    let reward = gateway.calculate_reward(&report.subscription_id).await?;
    tracing::info!(
        client_id = %report.client_id,
        subscription_id = %report.subscription_id,
        reward_id = %reward.id,
        discount_percentage = reward.discount_percentage,
        "Reward created"
    );
    Ok(Some(reward))
}
