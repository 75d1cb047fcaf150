//! Gym API client for the loyalty engine.
//!
//! The gym API is the source of truth for check-ins, subscriptions, plans and
//! rewards. This crate fetches those records and implements
//! [`gym_loyalty_core::RewardGateway`] so the redemption flow can write back.
//!
//! # Example
//!
//! ```no_run
//! use gym_loyalty_client::GymApiClient;
//! use gym_loyalty_core::{compute_streaks, ClientId};
//!
//! # async fn example() -> Result<(), gym_loyalty_client::ClientError> {
//! let client = GymApiClient::new("http://gym.local:8000/api", Some("token".into()))?;
//!
//! let client_id: ClientId = "42".parse().expect("valid id");
//! let attendances = client.list_attendances(&client_id).await?;
//! let today = chrono::Local::now().date_naive();
//!
//! let streaks = compute_streaks(&attendances, today);
//! println!("Current streak: {} days", streaks.current);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, GymApiClient};
pub use error::ClientError;
pub use types::*;
