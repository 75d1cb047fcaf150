//! Reward claim command.

use clap::Args;
use serde::Serialize;

use gym_loyalty_client::GymApiClient;
use gym_loyalty_core::{claim_reward, ClientId, CycleReport, Reward, SubscriptionId};

use super::report;
use crate::error::CliError;
use crate::output::{self, kv, money, OutputFormat};

/// Arguments for the claim command
#[derive(Debug, Args)]
pub struct ClaimArgs {
    /// Client the subscription belongs to
    #[arg(long)]
    pub client: ClientId,

    /// Finished cycle to claim a reward for
    #[arg(long)]
    pub subscription: SubscriptionId,
}

/// Result of a claim.
#[derive(Debug, Serialize)]
pub struct ClaimResult {
    report: CycleReport,
    reward: Option<Reward>,
}

/// Execute the claim command
pub async fn execute(
    args: &ClaimArgs,
    api: &GymApiClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let report = report::build(api, &args.client, &args.subscription).await?;
    let reward = claim_reward(api, &report).await?;

    output::print_item(&ClaimResult { report, reward }, format, render);
    Ok(())
}

fn render(result: &ClaimResult) -> String {
    match &result.reward {
        Some(reward) => {
            let mut out = format!("Reward {} created\n", reward.id);
            out.push_str(&kv("Discount", format!("{}%", money(reward.discount_percentage))));
            out.push_str(&kv("Check-ins", reward.attendance_count));
            out.push_str(&kv(
                "Expires",
                reward.expires_at.format("%Y-%m-%d %H:%M UTC"),
            ));
            out
        }
        None => format!(
            "No reward for cycle {}: {}\n",
            result.report.subscription_id,
            report::verdict(&result.report)
        ),
    }
}
