//! Gym API HTTP client implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

use gym_loyalty_core::{
    ApplyRewardRequest, Attendance, ClientId, NewSubscription, Plan, PlanId, Reward,
    RewardGateway, Subscription, SubscriptionId,
};

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, ApplyRewardBody, Listing};

/// Upper bound on pages followed for one listing.
const MAX_PAGES: usize = 500;

/// Gym API client.
///
/// Fetches the records the loyalty engine computes over and performs the few
/// writes redemption needs. Nothing is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct GymApiClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl GymApiClient {
    /// Create a new gym API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the gym API (e.g., `"http://gym.local:8000/api"`)
    /// * `api_token` - Bearer token, if the API requires one
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(base_url, api_token, &ClientOptions::default())
    }

    /// Create a new gym API client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        api_token: Option<String>,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.filter(|t| !t.is_empty()),
        })
    }

    /// List every check-in of a client, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn list_attendances(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Attendance>, ClientError> {
        let url = format!("{}/clients/{client_id}/attendances", self.base_url);
        self.list_all(url, ("client", client_id.as_str())).await
    }

    /// List a client's subscriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_subscriptions(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Subscription>, ClientError> {
        let url = format!("{}/clients/{client_id}/subscriptions", self.base_url);
        self.list_all(url, ("client", client_id.as_str())).await
    }

    /// Get one subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if it does not exist.
    pub async fn get_subscription(&self, id: &SubscriptionId) -> Result<Subscription, ClientError> {
        let url = format!("{}/subscriptions/{id}", self.base_url);
        self.send(self.client.get(&url), Some(("subscription", id.as_str())))
            .await
    }

    /// Get one catalog plan.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if it does not exist.
    pub async fn get_plan(&self, id: &PlanId) -> Result<Plan, ClientError> {
        let url = format!("{}/plans/{id}", self.base_url);
        self.send(self.client.get(&url), Some(("plan", id.as_str())))
            .await
    }

    /// List a client's rewards in every state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_rewards(&self, client_id: &ClientId) -> Result<Vec<Reward>, ClientError> {
        let url = format!("{}/clients/{client_id}/rewards", self.base_url);
        self.list_all(url, ("client", client_id.as_str())).await
    }

    /// Ask the API to create the reward earned by a finished cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API refuses.
    pub async fn request_reward(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Reward, ClientError> {
        let url = format!(
            "{}/subscriptions/{subscription_id}/calculate-reward",
            self.base_url
        );
        self.send(
            self.client.post(&url),
            Some(("subscription", subscription_id.as_str())),
        )
        .await
    }

    /// Create a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_subscription_record(
        &self,
        input: &NewSubscription,
    ) -> Result<Subscription, ClientError> {
        let url = format!("{}/subscriptions", self.base_url);
        self.send(self.client.post(&url).json(input), None).await
    }

    /// Apply a reward to a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RewardRejected`] when the API refuses the
    /// reward (400, 409 or 410), or any other request error.
    pub async fn apply_reward_record(
        &self,
        request: &ApplyRewardRequest,
    ) -> Result<Reward, ClientError> {
        let url = format!("{}/rewards/{}/apply", self.base_url, request.reward_id);
        let body = ApplyRewardBody {
            subscription_id: request.subscription_id.to_string(),
            discount_percentage: request.discount_percentage,
        };

        match self
            .send(
                self.client.post(&url).json(&body),
                Some(("reward", request.reward_id.as_str())),
            )
            .await
        {
            Err(ClientError::Api {
                message, status, ..
            }) if matches!(status, 400 | 409 | 410) => Err(ClientError::RewardRejected {
                reward_id: request.reward_id.to_string(),
                message,
            }),
            other => other,
        }
    }

    /// Collect every page of a list endpoint.
    async fn list_all<T: serde::de::DeserializeOwned>(
        &self,
        first_url: String,
        lookup: (&'static str, &str),
    ) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0;

        while let Some(url) = next {
            if pages == MAX_PAGES {
                tracing::warn!(pages, "Stopped following pagination");
                break;
            }
            let listing: Listing<T> = self.send(self.client.get(&url), Some(lookup)).await?;
            let (page, next_url) = listing.into_parts();
            items.extend(page);
            next = next_url;
            pages += 1;
        }

        tracing::debug!(
            entity = lookup.0,
            id = lookup.1,
            count = items.len(),
            pages,
            "Fetched listing"
        );
        Ok(items)
    }

    /// Send a request and decode the response.
    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        lookup: Option<(&'static str, &str)>,
    ) -> Result<T, ClientError> {
        let request = match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        self.handle_response(response, lookup).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        lookup: Option<(&'static str, &str)>,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some((entity, id)) = lookup {
                return Err(ClientError::NotFound {
                    entity,
                    id: id.to_string(),
                });
            }
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        let (code, message) = match error_body {
            Ok(api_error) => api_error.into_parts(),
            Err(_) => ("unknown".to_string(), format!("HTTP {status}")),
        };
        tracing::debug!(status = status.as_u16(), %code, %message, "Gym API error");

        Err(ClientError::Api {
            code,
            message,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl RewardGateway for GymApiClient {
    async fn create_subscription(
        &self,
        input: &NewSubscription,
    ) -> gym_loyalty_core::Result<Subscription> {
        Ok(self.create_subscription_record(input).await?)
    }

    async fn apply_reward(&self, request: &ApplyRewardRequest) -> gym_loyalty_core::Result<Reward> {
        Ok(self.apply_reward_record(request).await?)
    }

    async fn calculate_reward(
        &self,
        subscription_id: &SubscriptionId,
    ) -> gym_loyalty_core::Result<Reward> {
        Ok(self.request_reward(subscription_id).await?)
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("gym-loyalty/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(seconds: u64) -> Self {
        Self {
            timeout_seconds: seconds,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = GymApiClient::new("http://localhost:8000/api", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api");
        assert!(client.api_token.is_none());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GymApiClient::new("http://localhost:8000/api/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = GymApiClient::new("/", None).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn blank_token_is_dropped() {
        let client = GymApiClient::new("http://localhost", Some(String::new())).unwrap();
        assert!(client.api_token.is_none());
    }

    #[test]
    fn client_options() {
        let options = ClientOptions::with_timeout(5);
        assert_eq!(options.timeout_seconds, 5);
        assert!(options.user_agent.starts_with("gym-loyalty/"));
        let client = GymApiClient::with_options("http://localhost", None, &options);
        assert!(client.is_ok());
    }
}
