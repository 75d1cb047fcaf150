//! Client error types.

use gym_loyalty_core::LoyaltyError;

/// Errors that can occur when talking to the gym API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The API refused to apply a reward (already applied, expired, ...).
    #[error("reward {reward_id} rejected: {message}")]
    RewardRejected {
        /// The reward.
        reward_id: String,
        /// Server message.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<ClientError> for LoyaltyError {
    fn from(err: ClientError) -> Self {
        Self::ExternalService {
            service: "gym-api".to_string(),
            message: err.to_string(),
        }
    }
}
