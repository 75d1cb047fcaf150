//! Plan purchase command.

use chrono::{Local, NaiveDate, Utc};
use clap::Args;

use gym_loyalty_client::GymApiClient;
use gym_loyalty_core::{purchase_subscription, ClientId, PlanId, PurchaseOutcome, PurchaseRequest};

use super::RewardChoice;
use crate::error::CliError;
use crate::output::{self, kv, money, OutputFormat};

/// Arguments for the purchase command
#[derive(Debug, Args)]
pub struct PurchaseArgs {
    /// Buyer
    #[arg(long)]
    pub client: ClientId,

    /// Plan to buy
    #[arg(long)]
    pub plan: PlanId,

    /// First day of the new cycle (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Reward selection
    #[command(flatten)]
    pub choice: RewardChoice,
}

/// Execute the purchase command
pub async fn execute(
    args: &PurchaseArgs,
    api: &GymApiClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plan = api.get_plan(&args.plan).await?;
    let now = Utc::now();
    let reward = args.choice.resolve(api, Some(&args.client), now).await?;

    let request = PurchaseRequest {
        client_id: args.client.clone(),
        plan,
        start_date: args.start.unwrap_or_else(|| Local::now().date_naive()),
    };

    tracing::info!(
        client_id = %request.client_id,
        plan_id = %request.plan.id,
        start_date = %request.start_date,
        reward_id = ?reward.as_ref().map(|r| r.id.as_str()),
        "Purchasing plan"
    );

    let outcome = purchase_subscription(api, &request, reward.as_ref(), now).await?;

    if let Some(warning) = &outcome.warning {
        output::print_warning(warning);
    }
    output::print_item(&outcome, format, render);
    Ok(())
}

fn render(outcome: &PurchaseOutcome) -> String {
    let subscription = &outcome.subscription;
    let mut out = format!(
        "Subscription {} created ({} to {})\n",
        subscription.id, subscription.start_date, subscription.end_date
    );
    out.push_str(&kv("Status", subscription.status.as_str()));
    out.push_str(&kv("Price", money(outcome.price.final_price)));
    if let Some(reward) = &outcome.applied_reward {
        out.push_str(&kv("Reward applied", reward.id.as_str()));
        out.push_str(&kv("You saved", money(outcome.price.saved_amount)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_loyalty_core::{price_with_discount, Subscription};

    fn subscription() -> Subscription {
        serde_json::from_value(serde_json::json!({
            "id": 20,
            "client_id": 42,
            "plan_id": 3,
            "start_date": "2026-10-18",
            "end_date": "2026-11-17",
            "status": "pending_payment",
            "final_price": "90.00"
        }))
        .unwrap()
    }

    #[test]
    fn renders_plain_purchase() {
        let outcome = PurchaseOutcome {
            subscription: subscription(),
            price: price_with_discount(100.0, 0.0),
            applied_reward: None,
            warning: Some("reward could not be applied".into()),
        };

        let text = render(&outcome);
        assert!(text.starts_with("Subscription 20 created (2026-10-18 to 2026-11-17)\n"));
        assert!(text.contains(&kv("Status", "pending_payment")));
        assert!(text.contains(&kv("Price", "100.00")));
        assert!(!text.contains("Reward applied"));
    }
}
