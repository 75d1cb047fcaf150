//! Discount pricing for redeemed rewards.
//!
//! The pricing formula itself does not clamp the percentage: above 100 it
//! yields a negative price. Range checks belong to [`validate_apply_input`],
//! which runs before a reward is submitted.

use serde::{Deserialize, Serialize};

use crate::error::{LoyaltyError, Result};
use crate::numeric::Numeric;
use crate::{RewardId, SubscriptionId};

/// Price after a discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedPrice {
    /// Amount to charge.
    pub final_price: f64,
    /// Amount the discount saves.
    pub saved_amount: f64,
}

/// Apply `discount_percentage` to `base_price`.
///
/// Both inputs may be numbers or numeric text; unparseable text counts as
/// zero. Results are rounded to cents and always sum back to the base price.
#[must_use]
pub fn price_with_discount(
    base_price: impl Into<Numeric>,
    discount_percentage: impl Into<Numeric>,
) -> DiscountedPrice {
    let base = round_cents(base_price.into().to_f64_lossy());
    let percentage = discount_percentage.into().to_f64_lossy();

    let saved_amount = round_cents(base * percentage / 100.0);
    DiscountedPrice {
        final_price: round_cents(base - saved_amount),
        saved_amount,
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A validated request to apply a reward to a subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyRewardRequest {
    /// Reward being redeemed.
    pub reward_id: RewardId,
    /// Subscription receiving the discount.
    pub subscription_id: SubscriptionId,
    /// Discount, within `[0, 100]`.
    pub discount_percentage: f64,
}

/// Validate reward application input before any network call.
///
/// # Errors
///
/// - [`LoyaltyError::MissingRewardId`] if `reward_id` is absent or blank.
/// - [`LoyaltyError::MissingSubscriptionId`] if `subscription_id` is absent or blank.
/// - [`LoyaltyError::InvalidDiscount`] if the percentage is not a finite
///   number within `[0, 100]`.
pub fn validate_apply_input(
    reward_id: Option<&str>,
    subscription_id: Option<&str>,
    discount_percentage: impl Into<Numeric>,
) -> Result<ApplyRewardRequest> {
    let reward_id = reward_id
        .and_then(|id| RewardId::new(id).ok())
        .ok_or(LoyaltyError::MissingRewardId)?;
    let subscription_id = subscription_id
        .and_then(|id| SubscriptionId::new(id).ok())
        .ok_or(LoyaltyError::MissingSubscriptionId)?;

    let discount_percentage = validate_discount_percentage(discount_percentage)?;

    Ok(ApplyRewardRequest {
        reward_id,
        subscription_id,
        discount_percentage,
    })
}

/// Check that a discount percentage is a finite number within `[0, 100]`.
///
/// # Errors
///
/// Returns [`LoyaltyError::InvalidDiscount`] otherwise.
pub fn validate_discount_percentage(value: impl Into<Numeric>) -> Result<f64> {
    let raw = value.into();
    raw.parse()
        .filter(|pct| (0.0..=100.0).contains(pct))
        .ok_or_else(|| LoyaltyError::InvalidDiscount {
            value: raw.to_string(),
        })
}
