//! Reward listing command.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use gym_loyalty_client::GymApiClient;
use gym_loyalty_core::{available_rewards, ClientId, Reward};

use crate::error::CliError;
use crate::output::{self, OutputFormat};

/// Arguments for the rewards command
#[derive(Debug, Args)]
pub struct RewardsArgs {
    /// Client whose rewards are listed
    #[arg(long)]
    pub client: ClientId,
}

/// Execute the rewards command
pub async fn execute(
    args: &RewardsArgs,
    api: &GymApiClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let rewards = api.list_rewards(&args.client).await?;
    let now = Utc::now();
    let available = available_rewards(&rewards, now);

    tracing::debug!(
        client_id = %args.client,
        total = rewards.len(),
        available = available.len(),
        "Listed rewards"
    );

    let rows = rows(&available, now);
    output::print_list(&rows, format, "No available rewards.");
    Ok(())
}

/// Reward display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RewardRow {
    /// Reward ID
    #[tabled(rename = "Reward")]
    id: String,
    /// Discount in percent
    #[tabled(rename = "Discount %")]
    discount_percentage: String,
    /// Expiry instant
    #[tabled(rename = "Expires")]
    expires_at: String,
    /// Whole days until expiry
    #[tabled(rename = "Days left")]
    days_left: i64,
    /// Subscription cycle that earned the reward
    #[tabled(rename = "Earned by cycle")]
    subscription_id: String,
}

fn rows(rewards: &[&Reward], now: DateTime<Utc>) -> Vec<RewardRow> {
    rewards
        .iter()
        .map(|reward| RewardRow {
            id: reward.id.to_string(),
            discount_percentage: output::money(reward.discount_percentage),
            expires_at: reward.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            days_left: (reward.expires_at - now).num_days(),
            subscription_id: reward.subscription_id.to_string(),
        })
        .collect()
}
