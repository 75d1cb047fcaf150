//! Cycle report command.

use chrono::Local;
use clap::Args;

use gym_loyalty_client::GymApiClient;
use gym_loyalty_core::{analyze_cycle, ClientId, CycleReport, SubscriptionId};

use crate::error::CliError;
use crate::output::{self, kv, OutputFormat};

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Client the subscription belongs to
    #[arg(long)]
    pub client: ClientId,

    /// Subscription whose cycle is analyzed
    #[arg(long)]
    pub subscription: SubscriptionId,
}

/// Execute the report command
pub async fn execute(
    args: &ReportArgs,
    api: &GymApiClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let report = build(api, &args.client, &args.subscription).await?;
    output::print_item(&report, format, render);
    Ok(())
}

/// Fetch the records for one cycle and analyze them as of today.
pub(crate) async fn build(
    api: &GymApiClient,
    client_id: &ClientId,
    subscription_id: &SubscriptionId,
) -> Result<CycleReport, CliError> {
    let subscription = api.get_subscription(subscription_id).await?;
    if &subscription.client_id != client_id {
        return Err(CliError::InvalidArgument(format!(
            "subscription {subscription_id} belongs to client {}, not {client_id}",
            subscription.client_id
        )));
    }

    let plan = api.get_plan(&subscription.plan_id).await?;
    let attendances = api.list_attendances(client_id).await?;
    let today = Local::now().date_naive();

    tracing::debug!(
        client_id = %client_id,
        subscription_id = %subscription_id,
        check_ins = attendances.len(),
        %today,
        "Analyzing cycle"
    );

    Ok(analyze_cycle(&attendances, &subscription, &plan, today))
}

/// Render a cycle report as text.
pub(crate) fn render(report: &CycleReport) -> String {
    let mut out = format!(
        "Cycle {} for client {} ({} to {})\n",
        report.subscription_id, report.client_id, report.cycle.start, report.cycle.end
    );
    out.push_str(&kv("Check-ins in cycle", report.cycle_count));
    out.push_str(&kv("This week", report.windows.this_week));
    out.push_str(&kv("This month", report.windows.this_month));
    out.push_str(&kv("Last 7 days", report.windows.last_7_days));
    out.push_str(&kv("Last 30 days", report.windows.last_30_days));
    out.push_str(&kv("Current streak", report.streaks.current));
    out.push_str(&kv("Longest streak", report.streaks.longest));
    out.push_str(&kv("Reward", verdict(report)));
    out
}

/// One-line eligibility verdict.
pub(crate) fn verdict(report: &CycleReport) -> String {
    let eligibility = &report.eligibility;
    match eligibility.reason {
        None => "eligible".to_string(),
        Some(reason) if eligibility.shortfall > 0 => format!(
            "not eligible: {} (needs {} more)",
            reason.message(),
            eligibility.shortfall
        ),
        Some(reason) => format!("not eligible: {}", reason.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gym_loyalty_core::{
        AttendanceWindows, CycleRange, Eligibility, IneligibleReason, Streaks,
    };

    fn report(eligibility: Eligibility) -> CycleReport {
        CycleReport {
            client_id: ClientId::new("42").unwrap(),
            subscription_id: SubscriptionId::new("7").unwrap(),
            cycle: CycleRange::new(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            ),
            cycle_count: eligibility.attendance_count,
            windows: AttendanceWindows::default(),
            streaks: Streaks {
                current: 2,
                longest: 9,
            },
            eligibility,
        }
    }

    #[test]
    fn renders_eligible_cycle() {
        let text = render(&report(Eligibility {
            eligible: true,
            attendance_count: 22,
            shortfall: 0,
            reason: None,
        }));
        assert!(text.starts_with("Cycle 7 for client 42 (2026-09-01 to 2026-09-30)"));
        assert!(text.contains(&kv("Check-ins in cycle", 22)));
        assert!(text.contains(&kv("Longest streak", 9)));
        assert!(text.contains(&kv("Reward", "eligible")));
    }

    #[test]
    fn verdict_names_shortfall() {
        let r = report(Eligibility {
            eligible: false,
            attendance_count: 17,
            shortfall: 3,
            reason: Some(IneligibleReason::BelowThreshold),
        });
        assert_eq!(
            verdict(&r),
            "not eligible: not enough check-ins in the cycle (needs 3 more)"
        );
    }

    #[test]
    fn verdict_without_shortfall() {
        let r = report(Eligibility {
            eligible: false,
            attendance_count: 25,
            shortfall: 0,
            reason: Some(IneligibleReason::CycleNotEnded),
        });
        assert_eq!(verdict(&r), "not eligible: the cycle has not ended yet");
    }
}
