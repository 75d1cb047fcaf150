//! Request and response types for the gym API client.

use serde::{Deserialize, Serialize};

/// A list endpoint response: either a bare array or one page of results.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// A page with a link to the next one.
    Page {
        /// Items on this page.
        results: Vec<T>,
        /// Absolute URL of the next page, if any.
        #[serde(default)]
        next: Option<String>,
    },
    /// The complete list.
    All(Vec<T>),
}

impl<T> Listing<T> {
    /// Split into items and the next page URL.
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Self::Page { results, next } => (results, next),
            Self::All(items) => (items, None),
        }
    }
}

/// Body for applying a reward to a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyRewardBody {
    /// Subscription receiving the discount.
    pub subscription_id: String,
    /// Discount percentage being applied.
    pub discount_percentage: f64,
}

/// Error response from the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorResponse {
    /// Structured `{ "error": { "code", "message" } }` body.
    Structured {
        /// Error details.
        error: ApiErrorBody,
    },
    /// Plain `{ "detail": "..." }` body.
    Detail {
        /// Error message.
        detail: String,
    },
}

/// Structured error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl ApiErrorResponse {
    /// Split into code and message; plain bodies get code `"error"`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::Structured { error } => (error.code, error.message),
            Self::Detail { detail } => ("error".to_string(), detail),
        }
    }
}
