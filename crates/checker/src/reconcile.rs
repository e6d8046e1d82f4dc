//! Reconciliation Driver: one full pass over the registry.
//!
//! For every registry device: find its monitoring twin, copy `lastSeenAt`,
//! evaluate health, record transitions in the audit log, and queue the device
//! for the batch update. Unmatched devices are audited and left out of the
//! batch. The batch is sent in a single request, or not at all when empty.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use fleet_health_core::{
    match_device, CheckId, HealthVerdict, MatchOutcome, MonitoringClient, RegistryClient,
    RegistryDevice,
};
use fleet_health_events::{AuditEvent, AuditLog};

use crate::error::ReconcileError;
use crate::evaluator::HealthEvaluator;

/// Devices sent back to the registry in one update.
pub type BatchUpdatePayload = Vec<RegistryDevice>;

// ---------------------------------------------------------------------------
// Audit messages
// ---------------------------------------------------------------------------

pub const NO_MATCH_MESSAGE: &str = "Did not find any matching device in the monitoring service";
pub const NOW_HEALTHY_MESSAGE: &str = "No failing checks anymore, device is now healthy";
pub const NOTHING_TO_UPDATE_MESSAGE: &str = "No devices to update";
pub const SENT_UPDATE_MESSAGE: &str = "Sent updated device configuration to the device registry";

fn ambiguous_message(count: usize) -> String {
    format!("Found {count} matching devices in the monitoring service")
}

fn no_longer_healthy_message(titles: &str) -> String {
    format!("Device is no longer healthy because of the following failing check(s): {titles}")
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Change of a device's health between the stored and the fresh verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    BecameHealthy,
    BecameUnhealthy { failing_titles: String },
}

impl Transition {
    /// `None` when the stored flag already agrees with the verdict.
    pub fn between(was_healthy: bool, verdict: &HealthVerdict) -> Option<Self> {
        match (was_healthy, verdict.is_healthy()) {
            (false, true) => Some(Self::BecameHealthy),
            (true, false) => Some(Self::BecameUnhealthy {
                failing_titles: verdict.failing_titles(),
            }),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BecameHealthy => NOW_HEALTHY_MESSAGE.to_string(),
            Self::BecameUnhealthy { failing_titles } => no_longer_healthy_message(failing_titles),
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Runs reconciliation passes against the two upstream services.
pub struct Reconciler<'a> {
    monitoring: &'a dyn MonitoringClient,
    registry: &'a dyn RegistryClient,
}

impl<'a> Reconciler<'a> {
    pub fn new(monitoring: &'a dyn MonitoringClient, registry: &'a dyn RegistryClient) -> Self {
        Self {
            monitoring,
            registry,
        }
    }

    /// Reconcile at the current time.
    pub async fn run<W: Write>(
        &self,
        ignored_checks: &HashSet<CheckId>,
        audit: &mut AuditLog<W>,
    ) -> Result<BatchUpdatePayload, ReconcileError> {
        self.run_at(ignored_checks, Utc::now(), audit).await
    }

    /// Reconcile, measuring grace windows against `now`.
    ///
    /// Returns the payload that was sent. Any upstream failure aborts the
    /// run; if it happens before the update call, the registry is untouched.
    pub async fn run_at<W: Write>(
        &self,
        ignored_checks: &HashSet<CheckId>,
        now: DateTime<Utc>,
        audit: &mut AuditLog<W>,
    ) -> Result<BatchUpdatePayload, ReconcileError> {
        let registry_devices = self.registry.list_devices().await?;
        let monitoring_devices = self.monitoring.list_devices().await?;

        tracing::debug!(
            registry = registry_devices.len(),
            monitoring = monitoring_devices.len(),
            "Fetched devices"
        );

        let mut evaluator = HealthEvaluator::new(self.monitoring, ignored_checks);
        let mut payload = BatchUpdatePayload::new();
        let mut unmatched = 0usize;

        for mut device in registry_devices {
            let matched = match match_device(
                &device.username,
                &device.serial,
                &device.platform,
                &monitoring_devices,
            ) {
                MatchOutcome::Matched(matched) => matched,
                MatchOutcome::NoMatch => {
                    unmatched += 1;
                    audit.emit(device_event(NO_MATCH_MESSAGE, &device))?;
                    continue;
                }
                MatchOutcome::Ambiguous { count } => {
                    unmatched += 1;
                    audit.emit(device_event(ambiguous_message(count), &device))?;
                    continue;
                }
            };

            device.last_seen_at = matched.last_seen_epoch();

            let verdict = evaluator.evaluate(matched, now).await?;
            if let Some(transition) = Transition::between(device.is_healthy, &verdict) {
                audit.emit(device_event(transition.message(), &device))?;
            }

            device.is_healthy = verdict.is_healthy();
            payload.push(device);
        }

        tracing::info!(
            matched = payload.len(),
            unmatched,
            unhealthy = payload.iter().filter(|d| !d.is_healthy).count(),
            "Evaluated registry devices"
        );

        if payload.is_empty() {
            audit.emit(AuditEvent::new(NOTHING_TO_UPDATE_MESSAGE))?;
            return Ok(payload);
        }

        self.registry.update_devices(&payload).await?;
        audit.emit(AuditEvent::new(SENT_UPDATE_MESSAGE))?;

        Ok(payload)
    }
}

fn device_event(message: impl Into<String>, device: &RegistryDevice) -> AuditEvent {
    AuditEvent::new(message).with_device(&device.serial, &device.platform, &device.username)
}
