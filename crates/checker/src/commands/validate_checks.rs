//! `validate-checks`: find checks that carry no severity tag.
//!
//! Output is meant for a CI job: a human-readable list followed by a
//! `::set-output` line holding the offending checks as JSON, which the
//! `notify-slack` step picks up.

use std::io::{self, Write};
use std::process::ExitCode;

use fleet_health_core::checks::incomplete_checks;
use fleet_health_core::MonitoringClient;
use fleet_health_monitoring::MonitoringApi;

use crate::cli::ValidateChecksArgs;
use crate::config::MonitoringConfig;

pub async fn run(args: &ValidateChecksArgs) -> anyhow::Result<ExitCode> {
    let config = MonitoringConfig::from_args(&args.monitoring)?;
    let monitoring = MonitoringApi::new(&config.api_token, &config.base_url, config.timeout)?;

    let complete = validate_checks(&monitoring, &args.checks_url, &mut io::stdout().lock()).await?;

    Ok(if complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Report untagged checks to `out`. Returns `true` when every check is tagged.
pub async fn validate_checks<W: Write>(
    monitoring: &dyn MonitoringClient,
    checks_url: &str,
    out: &mut W,
) -> anyhow::Result<bool> {
    let incomplete = incomplete_checks(monitoring.list_checks().await?);

    if incomplete.is_empty() {
        writeln!(out, "All checks have been configured")?;
        return Ok(true);
    }

    let checks_url = checks_url.trim_end_matches('/');
    writeln!(out, "The following checks are missing a severity tag:")?;
    for check in &incomplete {
        writeln!(
            out,
            "{name} (ID: {id}, {checks_url}/{id}): {description}",
            name = check.name,
            id = check.id,
            description = check.description,
        )?;
    }
    writeln!(
        out,
        "::set-output name=incomplete-checks::{}",
        serde_json::to_string(&incomplete)?
    )?;

    Ok(false)
}
