//! `notify-slack`: post the untagged-checks digest to a chat webhook.

use std::process::ExitCode;

use fleet_health_events::digest::incomplete_checks_message;
use fleet_health_events::WebhookDelivery;

use crate::cli::NotifySlackArgs;
use crate::config::NotifySlackConfig;

pub async fn run(args: &NotifySlackArgs) -> anyhow::Result<ExitCode> {
    let config = NotifySlackConfig::from_args(args)?;
    let delivery = WebhookDelivery::with_timeout(config.timeout)?;

    notify(&delivery, &config).await?;
    Ok(ExitCode::SUCCESS)
}

/// Send one digest message for `config.incomplete_checks`.
pub async fn notify(delivery: &WebhookDelivery, config: &NotifySlackConfig) -> anyhow::Result<()> {
    let message = incomplete_checks_message(&config.incomplete_checks, &config.checks_url);
    delivery.deliver(&config.webhook_url, &message).await?;

    tracing::info!(checks = config.incomplete_checks.len(), "Posted incomplete checks digest");
    Ok(())
}
