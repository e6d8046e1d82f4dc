//! `list-checks`: dump the monitoring service's checks as a JSON array.

use std::collections::HashSet;
use std::io::{self, Write};
use std::process::ExitCode;

use fleet_health_core::checks::failing_checks;
use fleet_health_core::{CheckId, MonitoringClient};
use fleet_health_monitoring::MonitoringApi;

use crate::cli::ListChecksArgs;
use crate::config::{ignored_checks, MonitoringConfig};

pub async fn run(args: &ListChecksArgs) -> anyhow::Result<ExitCode> {
    let config = MonitoringConfig::from_args(&args.monitoring)?;
    let monitoring = MonitoringApi::new(&config.api_token, &config.base_url, config.timeout)?;

    list_checks(
        &monitoring,
        args.failing_only,
        &ignored_checks(&args.ignore),
        &mut io::stdout().lock(),
    )
    .await?;

    Ok(ExitCode::SUCCESS)
}

/// Write every check, or only the failing non-ignored ones, as one JSON line.
pub async fn list_checks<W: Write>(
    monitoring: &dyn MonitoringClient,
    failing_only: bool,
    ignored: &HashSet<CheckId>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut checks = monitoring.list_checks().await?;
    if failing_only {
        checks = failing_checks(checks, ignored);
    }

    serde_json::to_writer(&mut *out, &checks)?;
    writeln!(out)?;
    Ok(())
}
