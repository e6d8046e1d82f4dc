//! Command-line interface.
//!
//! Every option also reads from an environment variable; `.env` files are
//! loaded before parsing. Values are validated separately in [`crate::config`]
//! so that a missing credential yields a targeted message instead of a usage
//! dump.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fleet_health_core::CheckId;
use fleet_health_events::audit::{DEFAULT_COMPONENT, DEFAULT_SYSTEM};
use fleet_health_events::digest::DEFAULT_CHECKS_URL;

/// Reconcile fleet device health against endpoint-monitoring checks.
#[derive(Debug, Parser)]
#[command(name = "device-health-checker", version)]
pub struct Cli {
    /// Format of diagnostic logs on stderr.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// `component` field of audit log lines.
    #[arg(long, env = "AUDIT_COMPONENT", default_value = DEFAULT_COMPONENT, global = true)]
    pub audit_component: String,

    /// `system` field of audit log lines.
    #[arg(long, env = "AUDIT_SYSTEM", default_value = DEFAULT_SYSTEM, global = true)]
    pub audit_system: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Update the health status of every registry device.
    UpdateDevices(UpdateDevicesArgs),

    /// Print the checks defined in the monitoring service as JSON.
    ListChecks(ListChecksArgs),

    /// Report checks without a severity tag; exits 1 when any are found.
    ValidateChecks(ValidateChecksArgs),

    /// Post the checks missing a severity tag to a chat webhook.
    NotifySlack(NotifySlackArgs),
}

// ---------------------------------------------------------------------------
// Shared option groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Args)]
pub struct MonitoringArgs {
    /// Token for the monitoring API.
    #[arg(short = 't', long, env = "MONITORING_API_TOKEN", hide_env_values = true)]
    pub monitoring_api_token: Option<String>,

    /// Root URL of the monitoring API.
    #[arg(long, env = "MONITORING_API_URL", default_value = fleet_health_monitoring::DEFAULT_BASE_URL)]
    pub monitoring_api_url: String,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct IgnoreArgs {
    /// Check to leave out of the evaluation. Repeatable.
    #[arg(short = 'i', long = "ignore-checks", value_name = "CHECK_ID", env = "IGNORE_CHECKS", value_delimiter = ',')]
    pub ignore_checks: Vec<CheckId>,
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Args)]
pub struct UpdateDevicesArgs {
    #[command(flatten)]
    pub monitoring: MonitoringArgs,

    #[command(flatten)]
    pub ignore: IgnoreArgs,

    /// Username for the device registry.
    #[arg(short = 'u', long, env = "REGISTRY_USERNAME", default_value = "device-health-checker")]
    pub registry_username: String,

    /// Password for the device registry.
    #[arg(short = 'p', long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
    pub registry_password: Option<String>,

    /// Root URL of the device registry.
    #[arg(long, env = "REGISTRY_URL", default_value = fleet_health_registry::DEFAULT_BASE_URL)]
    pub registry_url: String,
}

#[derive(Debug, Clone, Args)]
pub struct ListChecksArgs {
    #[command(flatten)]
    pub monitoring: MonitoringArgs,

    #[command(flatten)]
    pub ignore: IgnoreArgs,

    /// Only list checks currently failing on at least one device.
    #[arg(long)]
    pub failing_only: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateChecksArgs {
    #[command(flatten)]
    pub monitoring: MonitoringArgs,

    /// Base URL for links to individual checks.
    #[arg(long, env = "CHECKS_URL", default_value = DEFAULT_CHECKS_URL)]
    pub checks_url: String,
}

#[derive(Debug, Clone, Args)]
pub struct NotifySlackArgs {
    /// JSON array of checks, as printed by `validate-checks`.
    #[arg(long, env = "INCOMPLETE_CHECKS")]
    pub incomplete_checks: Option<String>,

    /// Incoming-webhook URL of the chat channel.
    #[arg(long, env = "SLACK_WEBHOOK", hide_env_values = true)]
    pub slack_webhook: Option<String>,

    /// Base URL for links to individual checks.
    #[arg(long, env = "CHECKS_URL", default_value = DEFAULT_CHECKS_URL)]
    pub checks_url: String,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}
