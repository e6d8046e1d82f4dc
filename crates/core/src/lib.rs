//! Fleet device health: domain model and decision logic.
//!
//! - [`types`] - registry and monitoring records.
//! - [`severity`] - tag vocabulary and grace-time policy.
//! - [`identity`] - matching a registry device to a monitoring device.
//! - [`health`] - deciding which failures block a device.
//! - [`checks`] - check-level queries for the listing and audit commands.
//! - [`clients`] - traits implemented by the upstream HTTP clients.
//!
//! Nothing in this crate performs I/O.

pub mod checks;
pub mod clients;
pub mod error;
pub mod health;
pub mod identity;
pub mod severity;
pub mod types;

pub use clients::{MonitoringClient, RegistryClient};
pub use error::UpstreamError;
pub use health::HealthVerdict;
pub use identity::{match_device, MatchOutcome};
pub use severity::{GraceTime, Severity};
pub use types::*;
