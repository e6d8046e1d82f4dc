//! Output channels of the device health checker.
//!
//! - [`AuditLog`] - the line-delimited JSON audit trail written during a
//!   reconciliation run.
//! - [`digest`] - chat message listing checks that lack a severity tag.
//! - [`delivery`] - webhook delivery for that message.

pub mod audit;
pub mod delivery;
pub mod digest;

pub use audit::{AuditEntry, AuditEvent, AuditLevel, AuditLog};
pub use delivery::webhook::{WebhookDelivery, WebhookError};
