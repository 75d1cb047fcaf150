//! Error types for gym loyalty operations.

use crate::ids::IdError;

/// Result type for gym loyalty operations.
pub type Result<T> = std::result::Result<T, LoyaltyError>;

/// Errors that can occur in gym loyalty operations.
#[derive(Debug, thiserror::Error)]
pub enum LoyaltyError {
    /// Reward apply input is missing the reward identifier.
    #[error("reward id is required")]
    MissingRewardId,

    /// Reward apply input is missing the subscription identifier.
    #[error("subscription id is required")]
    MissingSubscriptionId,

    /// Discount percentage is non-numeric or outside `[0, 100]`.
    #[error("invalid discount percentage: {value}")]
    InvalidDiscount {
        /// The rejected input, as received.
        value: String,
    },

    /// The reward can no longer be applied.
    #[error("reward {reward_id} is not available: {reason}")]
    RewardUnavailable {
        /// The reward that was rejected.
        reward_id: String,
        /// Why it is unavailable.
        reason: String,
    },

    /// The plan cannot produce a cycle.
    #[error("invalid plan {plan_id}: {reason}")]
    InvalidPlan {
        /// The offending plan.
        plan_id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Remote gym API error.
    #[error("external service error: {service} - {message}")]
    ExternalService {
        /// The service that failed.
        service: String,
        /// Error message.
        message: String,
    },
}
