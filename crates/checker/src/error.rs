//! Error types for the checker commands.

use std::io;

use fleet_health_core::UpstreamError;

/// Invalid or missing process configuration.
///
/// Raised before any network call; reported as plain text.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent or empty. Carries the operator-facing hint.
    #[error("{0}")]
    Missing(String),

    /// A setting is present but unusable.
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Failed to write audit log: {0}")]
    Audit(#[from] io::Error),
}
