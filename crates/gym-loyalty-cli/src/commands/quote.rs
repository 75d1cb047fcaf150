//! Price quote command.

use chrono::Utc;
use clap::Args;
use serde::Serialize;

use gym_loyalty_client::GymApiClient;
use gym_loyalty_core::{
    price_with_discount, validate_discount_percentage, ClientId, DiscountedPrice, PlanId,
    RewardId,
};

use super::RewardChoice;
use crate::error::CliError;
use crate::output::{self, kv, money, OutputFormat};

/// Arguments for the quote command
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Plan to price
    #[arg(long)]
    pub plan: PlanId,

    /// Client whose reward would be redeemed
    #[arg(long)]
    pub client: Option<ClientId>,

    /// Reward selection
    #[command(flatten)]
    pub choice: RewardChoice,
}

/// A priced plan.
#[derive(Debug, Serialize)]
pub struct Quote {
    plan_id: PlanId,
    plan_name: String,
    base_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reward_id: Option<RewardId>,
    discount_percentage: f64,
    #[serde(flatten)]
    price: DiscountedPrice,
}

/// Execute the quote command
pub async fn execute(
    args: &QuoteArgs,
    api: &GymApiClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plan = api.get_plan(&args.plan).await?;
    let now = Utc::now();
    let reward = args
        .choice
        .resolve(api, args.client.as_ref(), now)
        .await?;

    let discount_percentage = match &reward {
        Some(r) => {
            r.ensure_available(now)?;
            validate_discount_percentage(r.discount_percentage)?
        }
        None => 0.0,
    };

    let quote = Quote {
        plan_id: plan.id.clone(),
        plan_name: plan.name.clone(),
        base_price: plan.price,
        reward_id: reward.as_ref().map(|r| r.id.clone()),
        discount_percentage,
        price: price_with_discount(plan.price, discount_percentage),
    };

    output::print_item(&quote, format, render);
    Ok(())
}

fn render(quote: &Quote) -> String {
    let mut out = format!("Plan {} ({})\n", quote.plan_name, quote.plan_id);
    out.push_str(&kv("Base price", money(quote.base_price)));
    if let Some(reward_id) = &quote.reward_id {
        out.push_str(&kv(
            "Reward",
            format!("{reward_id} ({}% off)", money(quote.discount_percentage)),
        ));
    }
    out.push_str(&kv("Final price", money(quote.price.final_price)));
    out.push_str(&kv("You save", money(quote.price.saved_amount)));
    out
}
