//! Validated configuration for each command.
//!
//! Built from the parsed [`crate::cli`] arguments before any client is
//! created. Empty strings count as missing.

use std::collections::HashSet;
use std::time::Duration;

use fleet_health_core::{Check, CheckId};
use fleet_health_registry::RegistryCredentials;

use crate::cli::{IgnoreArgs, MonitoringArgs, NotifySlackArgs, UpdateDevicesArgs};
use crate::error::ConfigError;

/// Connection settings for the monitoring API.
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub api_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl MonitoringConfig {
    pub fn from_args(args: &MonitoringArgs) -> Result<Self, ConfigError> {
        Ok(Self {
            api_token: required(
                args.monitoring_api_token.as_deref(),
                "Specify a token for the monitoring API using -t/--monitoring-api-token or MONITORING_API_TOKEN",
            )?,
            base_url: required(
                Some(args.monitoring_api_url.as_str()),
                "Specify the monitoring API URL using --monitoring-api-url or MONITORING_API_URL",
            )?,
            timeout: timeout(args.timeout_secs)?,
        })
    }
}

/// Connection settings for the device registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub credentials: RegistryCredentials,
    pub timeout: Duration,
}

/// Everything `update-devices` needs.
#[derive(Debug, Clone)]
pub struct UpdateDevicesConfig {
    pub monitoring: MonitoringConfig,
    pub registry: RegistryConfig,
    pub ignored_checks: HashSet<CheckId>,
}

impl UpdateDevicesConfig {
    pub fn from_args(args: &UpdateDevicesArgs) -> Result<Self, ConfigError> {
        let monitoring = MonitoringConfig::from_args(&args.monitoring)?;

        let registry = RegistryConfig {
            base_url: required(
                Some(args.registry_url.as_str()),
                "Specify the device registry URL using --registry-url or REGISTRY_URL",
            )?,
            credentials: RegistryCredentials {
                username: required(
                    Some(args.registry_username.as_str()),
                    "Specify a username for the device registry using -u/--registry-username or REGISTRY_USERNAME",
                )?,
                password: required(
                    args.registry_password.as_deref(),
                    "Specify a password for the device registry using -p/--registry-password or REGISTRY_PASSWORD",
                )?,
            },
            timeout: monitoring.timeout,
        };

        Ok(Self {
            monitoring,
            registry,
            ignored_checks: ignored_checks(&args.ignore),
        })
    }
}

/// Everything `notify-slack` needs.
#[derive(Debug, Clone)]
pub struct NotifySlackConfig {
    pub incomplete_checks: Vec<Check>,
    pub webhook_url: String,
    pub checks_url: String,
    pub timeout: Duration,
}

impl NotifySlackConfig {
    pub fn from_args(args: &NotifySlackArgs) -> Result<Self, ConfigError> {
        let raw_checks = required(
            args.incomplete_checks.as_deref(),
            "Missing INCOMPLETE_CHECKS environment variable",
        )?;
        let incomplete_checks =
            serde_json::from_str(&raw_checks).map_err(|e| ConfigError::Invalid {
                name: "INCOMPLETE_CHECKS",
                reason: format!("Unable to decode JSON: {e}"),
            })?;

        Ok(Self {
            incomplete_checks,
            webhook_url: required(
                args.slack_webhook.as_deref(),
                "Missing SLACK_WEBHOOK environment variable",
            )?,
            checks_url: args.checks_url.clone(),
            timeout: timeout(args.timeout_secs)?,
        })
    }
}

/// Deduplicated set of check ids to leave out of evaluation.
pub fn ignored_checks(args: &IgnoreArgs) -> HashSet<CheckId> {
    args.ignore_checks.iter().copied().collect()
}

// ---- private helpers ----

fn required(value: Option<&str>, message: &str) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ConfigError::Missing(message.to_string())),
    }
}

fn timeout(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name: "HTTP_TIMEOUT_SECS",
            reason: "must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
