//! Device health checker.
//!
//! Reconciles the health flag of every device in the device registry with
//! the failing checks reported by the endpoint-monitoring service, and
//! provides the check-listing and severity-tag audit commands around it.

pub mod boundary;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod reconcile;

pub use error::{ConfigError, ReconcileError};
pub use evaluator::HealthEvaluator;
pub use reconcile::{BatchUpdatePayload, Reconciler, Transition};
