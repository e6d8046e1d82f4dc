//! `device-health-checker` -- fleet device health reconciliation job.
//!
//! Run once per schedule tick. The audit log goes to stdout as JSON lines,
//! diagnostics go to stderr.
//!
//! # Exit codes
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | `0`  | Success                                                     |
//! | `1`  | Run failed (one JSON error line on stdout), or `validate-checks` found untagged checks |
//! | `2`  | Invalid configuration (plain text on stderr)                |

use std::io;
use std::process::ExitCode;

use clap::Parser;
use fleet_health_checker::cli::{Cli, LogFormat};
use fleet_health_checker::{boundary, commands};
use fleet_health_events::AuditLog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "fleet_health_checker=info,fleet_health_monitoring=info";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);
    boundary::install_panic_hook(cli.audit_component.clone(), cli.audit_system.clone());

    match commands::run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            let mut audit = AuditLog::stdout(&cli.audit_component, &cli.audit_system);
            ExitCode::from(boundary::report_failure(&err, &mut audit, &mut io::stderr()))
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
