//! CLI command definitions and dispatch.

pub mod claim;
pub mod purchase;
pub mod quote;
pub mod report;
pub mod rewards;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use gym_loyalty_client::{ClientOptions, GymApiClient};
use gym_loyalty_core::{select_best_reward, ClientId, Reward, RewardId};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Gym loyalty console: attendance reports and reward redemption
#[derive(Debug, Parser)]
#[command(name = "gym-loyalty", version, about, long_about = None)]
pub struct Cli {
    /// Gym API base URL (overrides GYM_API_URL and the secrets file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Attendance report and reward verdict for one subscription cycle
    Report(report::ReportArgs),
    /// Available rewards, soonest-expiring first
    Rewards(rewards::RewardsArgs),
    /// Price a plan with or without a reward
    Quote(quote::QuoteArgs),
    /// Buy a plan, optionally redeeming a reward
    Purchase(purchase::PurchaseArgs),
    /// Ask for the reward a finished cycle earned
    Claim(claim::ClaimArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), CliError> {
        let api = self.api()?;

        match &self.command {
            Commands::Report(args) => report::execute(args, &api, self.format).await,
            Commands::Rewards(args) => rewards::execute(args, &api, self.format).await,
            Commands::Quote(args) => quote::execute(args, &api, self.format).await,
            Commands::Purchase(args) => purchase::execute(args, &api, self.format).await,
            Commands::Claim(args) => claim::execute(args, &api, self.format).await,
        }
    }

    fn api(&self) -> Result<GymApiClient, CliError> {
        let config = CliConfig::from_env();
        let api_url = self.api_url.clone().unwrap_or(config.api_url);

        tracing::debug!(
            api_url = %api_url,
            token_configured = config.api_token.is_some(),
            timeout_seconds = config.timeout_seconds,
            "Gym API configuration loaded"
        );

        Ok(GymApiClient::with_options(
            api_url,
            config.api_token,
            &ClientOptions::with_timeout(config.timeout_seconds),
        )?)
    }
}

/// How a command picks the reward to redeem.
///
/// Flattened into commands that also define a `--client` argument.
#[derive(Debug, Clone, Args)]
pub struct RewardChoice {
    /// Redeem this reward
    #[arg(long, requires = "client", conflicts_with = "best_reward")]
    pub reward: Option<RewardId>,

    /// Redeem the client's soonest-expiring available reward
    #[arg(long, requires = "client")]
    pub best_reward: bool,
}

impl RewardChoice {
    /// Fetch the chosen reward, if any was asked for.
    ///
    /// An explicitly named reward is returned whatever its state so the
    /// redemption rules can refuse it with a precise reason.
    pub async fn resolve(
        &self,
        api: &GymApiClient,
        client_id: Option<&ClientId>,
        now: DateTime<Utc>,
    ) -> Result<Option<Reward>, CliError> {
        let Some(client_id) = client_id else {
            return Ok(None);
        };
        if self.reward.is_none() && !self.best_reward {
            return Ok(None);
        }

        let rewards = api.list_rewards(client_id).await?;
        pick_reward(&rewards, client_id, self.reward.as_ref(), now).map(|r| r.cloned())
    }
}

/// Choose the named reward, or the best available one when none is named.
fn pick_reward<'a>(
    rewards: &'a [Reward],
    client_id: &ClientId,
    wanted: Option<&RewardId>,
    now: DateTime<Utc>,
) -> Result<Option<&'a Reward>, CliError> {
    match wanted {
        Some(id) => rewards
            .iter()
            .find(|r| &r.id == id)
            .map(Some)
            .ok_or_else(|| CliError::RewardNotFound {
                reward_id: id.to_string(),
                client_id: client_id.to_string(),
            }),
        None => Ok(select_best_reward(rewards, now)),
    }
}
