//! In-memory upstream services for driving the checker without HTTP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleet_health_core::{
    AssignedOwner, Check, CheckFailure, CheckId, DeviceId, MonitoringClient, MonitoringDevice,
    RegistryClient, RegistryDevice, UpstreamError,
};
use fleet_health_events::audit::parse_lines;
use fleet_health_events::{AuditEntry, AuditLog};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn at(epoch: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch, 0).unwrap()
}

pub fn registry_device(
    serial: &str,
    platform: &str,
    username: &str,
    is_healthy: bool,
    last_seen_at: i64,
) -> RegistryDevice {
    RegistryDevice {
        serial: serial.to_string(),
        platform: platform.to_string(),
        username: username.to_string(),
        is_healthy,
        last_seen_at: Some(last_seen_at),
    }
}

pub fn monitoring_device(
    id: DeviceId,
    serial: &str,
    platform: &str,
    email: Option<&str>,
    failure_count: u32,
    last_seen_at: i64,
) -> MonitoringDevice {
    MonitoringDevice {
        id,
        serial: serial.to_string(),
        platform: platform.to_string(),
        assigned_owner: Some(AssignedOwner {
            email: email.map(str::to_string),
        }),
        failure_count,
        last_seen_at: Some(at(last_seen_at)),
    }
}

pub fn open_failure(check_id: CheckId, timestamp: DateTime<Utc>, title: &str) -> CheckFailure {
    CheckFailure {
        check_id,
        resolved_at: None,
        timestamp,
        title: title.to_string(),
    }
}

pub fn check(id: CheckId, tags: &[&str]) -> Check {
    Check {
        id,
        name: format!("check{id}"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// FakeMonitoring
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeMonitoring {
    pub devices: Vec<MonitoringDevice>,
    pub checks: Vec<Check>,
    pub failures: HashMap<DeviceId, Vec<CheckFailure>>,
    /// Device whose failure listing answers with a 503.
    pub unavailable_device: Option<DeviceId>,
    pub failure_calls: Mutex<Vec<DeviceId>>,
    pub check_calls: Mutex<Vec<CheckId>>,
}

impl FakeMonitoring {
    pub fn new(devices: Vec<MonitoringDevice>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn with_failures(mut self, device_id: DeviceId, failures: Vec<CheckFailure>) -> Self {
        self.failures.insert(device_id, failures);
        self
    }

    pub fn failure_calls(&self) -> Vec<DeviceId> {
        self.failure_calls.lock().unwrap().clone()
    }

    pub fn check_calls(&self) -> Vec<CheckId> {
        self.check_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MonitoringClient for FakeMonitoring {
    async fn list_devices(&self) -> Result<Vec<MonitoringDevice>, UpstreamError> {
        Ok(self.devices.clone())
    }

    async fn list_checks(&self) -> Result<Vec<Check>, UpstreamError> {
        Ok(self.checks.clone())
    }

    async fn get_check(&self, id: CheckId) -> Result<Option<Check>, UpstreamError> {
        self.check_calls.lock().unwrap().push(id);
        Ok(self.checks.iter().find(|check| check.id == id).cloned())
    }

    async fn list_device_failures(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<CheckFailure>, UpstreamError> {
        self.failure_calls.lock().unwrap().push(device_id);

        if self.unavailable_device == Some(device_id) {
            return Err(UpstreamError::Api {
                service: "monitoring service",
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        Ok(self.failures.get(&device_id).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// FakeRegistry
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRegistry {
    pub devices: Vec<RegistryDevice>,
    pub reject_updates: bool,
    pub updates: Mutex<Vec<Vec<RegistryDevice>>>,
}

impl FakeRegistry {
    pub fn new(devices: Vec<RegistryDevice>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    pub fn updates(&self) -> Vec<Vec<RegistryDevice>> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryClient for FakeRegistry {
    async fn list_devices(&self) -> Result<Vec<RegistryDevice>, UpstreamError> {
        Ok(self.devices.clone())
    }

    async fn update_devices(&self, devices: &[RegistryDevice]) -> Result<(), UpstreamError> {
        if self.reject_updates {
            return Err(UpstreamError::Api {
                service: "device registry",
                status: 500,
                body: "database unavailable".to_string(),
            });
        }

        self.updates.lock().unwrap().push(devices.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Audit capture
// ---------------------------------------------------------------------------

pub fn audit_buffer() -> AuditLog<Vec<u8>> {
    AuditLog::new("device-health-checker", "fleet-device", Vec::new())
}

pub fn audit_entries(audit: AuditLog<Vec<u8>>) -> Vec<AuditEntry> {
    let output = String::from_utf8(audit.into_inner()).unwrap();
    parse_lines(&output).unwrap()
}

pub fn messages(entries: &[AuditEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.message.as_str()).collect()
}

pub fn serials(entries: &[AuditEntry]) -> Vec<Option<&str>> {
    entries.iter().map(|entry| entry.serial.as_deref()).collect()
}
