//! Subcommand implementations.
//!
//! Each module exposes a `run` entry point that validates its configuration,
//! builds the HTTP clients and delegates to a function generic over the
//! client traits and the output writer.

pub mod list_checks;
pub mod notify_slack;
pub mod update_devices;
pub mod validate_checks;

use std::process::ExitCode;

use crate::cli::{Cli, Command};

/// Dispatch the parsed command line.
pub async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::UpdateDevices(args) => {
            update_devices::run(args, &cli.audit_component, &cli.audit_system).await
        }
        Command::ListChecks(args) => list_checks::run(args).await,
        Command::ValidateChecks(args) => validate_checks::run(args).await,
        Command::NotifySlack(args) => notify_slack::run(args).await,
    }
}
