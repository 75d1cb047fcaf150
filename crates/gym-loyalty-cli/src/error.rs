//! CLI error type.

use gym_loyalty_client::ClientError;
use gym_loyalty_core::LoyaltyError;

/// Errors surfaced to the operator.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Gym API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A loyalty rule refused the operation.
    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),

    /// The named reward is not among the client's rewards.
    #[error("reward {reward_id} not found for client {client_id}")]
    RewardNotFound {
        /// Reward looked up.
        reward_id: String,
        /// Client whose rewards were searched.
        client_id: String,
    },

    /// Arguments that parse but contradict the fetched records.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
