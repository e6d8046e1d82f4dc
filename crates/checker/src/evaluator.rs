//! Health Evaluator: decides whether one matched monitoring device is healthy.
//!
//! Pulls the device's failures and the tags of the checks behind them, then
//! hands the pure decisions to [`fleet_health_core::health`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use fleet_health_core::health::{is_blocking, needs_evaluation};
use fleet_health_core::severity::{self, DEFAULT_SEVERITY};
use fleet_health_core::{CheckId, GraceTime, HealthVerdict, MonitoringClient, MonitoringDevice, UpstreamError};

/// Evaluates devices against the monitoring service for one run.
///
/// Grace times are cached by check id, so each check is looked up at most
/// once per evaluator.
pub struct HealthEvaluator<'a> {
    monitoring: &'a dyn MonitoringClient,
    ignored_checks: &'a HashSet<CheckId>,
    grace_times: HashMap<CheckId, GraceTime>,
}

impl<'a> HealthEvaluator<'a> {
    pub fn new(monitoring: &'a dyn MonitoringClient, ignored_checks: &'a HashSet<CheckId>) -> Self {
        Self {
            monitoring,
            ignored_checks,
            grace_times: HashMap::new(),
        }
    }

    /// Verdict for `device` at `now`.
    ///
    /// A device reporting no failures is healthy without any further request.
    pub async fn evaluate(
        &mut self,
        device: &MonitoringDevice,
        now: DateTime<Utc>,
    ) -> Result<HealthVerdict, UpstreamError> {
        if device.failure_count == 0 {
            return Ok(HealthVerdict::healthy());
        }

        let failures = self.monitoring.list_device_failures(device.id).await?;
        let mut blocking_failures = Vec::new();

        for failure in failures {
            if !needs_evaluation(&failure, self.ignored_checks) {
                continue;
            }

            let grace = self.grace_time(failure.check_id).await?;
            if is_blocking(grace, failure.timestamp, now) {
                blocking_failures.push(failure);
            }
        }

        tracing::debug!(
            device_id = device.id,
            blocking = blocking_failures.len(),
            "Evaluated device"
        );

        Ok(HealthVerdict { blocking_failures })
    }

    async fn grace_time(&mut self, check_id: CheckId) -> Result<GraceTime, UpstreamError> {
        if let Some(grace) = self.grace_times.get(&check_id) {
            return Ok(*grace);
        }

        let grace = match self.monitoring.get_check(check_id).await? {
            Some(check) => severity::grace_time(&check.tags),
            None => DEFAULT_SEVERITY.grace_time(),
        };

        self.grace_times.insert(check_id, grace);
        Ok(grace)
    }
}
