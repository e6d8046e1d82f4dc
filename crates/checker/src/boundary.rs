//! Process-level failure reporting.
//!
//! Configuration problems are printed as plain text, every other failure
//! becomes a single `error` line in the audit log.

use std::io::Write;

use fleet_health_events::AuditLog;

use crate::error::ConfigError;

/// Exit status after a failed run.
pub const EXIT_RUN_FAILED: u8 = 1;

/// Exit status after invalid configuration.
pub const EXIT_INVALID_CONFIG: u8 = 2;

/// Report `err` and return the process exit status.
pub fn report_failure<O: Write, E: Write>(
    err: &anyhow::Error,
    audit: &mut AuditLog<O>,
    stderr: &mut E,
) -> u8 {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        let _ = writeln!(stderr, "{config_err}");
        return EXIT_INVALID_CONFIG;
    }

    let message = format!("{err:#}");
    tracing::error!(error = %message, "Command failed");

    if let Err(write_err) = audit.emit_error(message.as_str()) {
        let _ = writeln!(stderr, "{message} (audit log unavailable: {write_err})");
    }

    EXIT_RUN_FAILED
}

/// Panics still leave one error line in the audit log before the default
/// report on stderr.
pub fn install_panic_hook(component: String, system: String) {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let mut audit = AuditLog::stdout(component.as_str(), system.as_str());
        let _ = audit.emit_error(format!("Unexpected failure: {info}"));
        default_hook(info);
    }));
}
