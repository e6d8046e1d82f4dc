//! Domain records exchanged with the device registry and the
//! endpoint-monitoring service.
//!
//! Registry records use the registry's camelCase wire format; monitoring
//! records use the monitoring API's snake_case format. Both are plain data:
//! all decisions live in [`identity`](crate::identity),
//! [`severity`](crate::severity) and [`health`](crate::health).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key of a device in the monitoring service.
pub type DeviceId = i64;

/// Primary key of a check in the monitoring service.
pub type CheckId = i64;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Platforms known to the device registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Linux,
}

impl Platform {
    /// String representation as stored in the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
        }
    }

    /// Map a free-form monitoring-service platform onto a registry platform.
    ///
    /// Only the literal values `windows` and `darwin` are distinguished; every
    /// other value (`ubuntu`, `rhel`, `arch`, ...) is treated as `linux`.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "windows" => Platform::Windows,
            "darwin" => Platform::Darwin,
            _ => Platform::Linux,
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryDevice
// ---------------------------------------------------------------------------

/// A device as known to the internal device registry.
///
/// Read once per run, mutated in memory with the new verdict and written back
/// in a single batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDevice {
    pub serial: String,
    /// `windows`, `darwin` or `linux`. Kept as a string because the
    /// comparison against monitoring data is case-insensitive.
    pub platform: String,
    /// Owner identity, usually an email address.
    pub username: String,
    /// Verdict recorded by the previous run.
    pub is_healthy: bool,
    /// Last time the monitoring service saw the device (epoch seconds).
    #[serde(default)]
    pub last_seen_at: Option<i64>,
}

// ---------------------------------------------------------------------------
// MonitoringDevice
// ---------------------------------------------------------------------------

/// Owner assignment attached to a monitoring device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedOwner {
    #[serde(default)]
    pub email: Option<String>,
}

/// A device as known to the endpoint-monitoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringDevice {
    pub id: DeviceId,
    #[serde(default)]
    pub serial: String,
    /// Free-form platform name, see [`Platform::normalize`].
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub assigned_owner: Option<AssignedOwner>,
    /// Number of open failures reported for the device.
    #[serde(default)]
    pub failure_count: u32,
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl MonitoringDevice {
    /// Email of the assigned owner, if one is set and non-empty.
    pub fn owner_email(&self) -> Option<&str> {
        self.assigned_owner
            .as_ref()
            .and_then(|owner| owner.email.as_deref())
            .filter(|email| !email.is_empty())
    }

    /// `last_seen_at` as epoch seconds.
    pub fn last_seen_epoch(&self) -> Option<i64> {
        self.last_seen_at.map(|ts| ts.timestamp())
    }
}

// ---------------------------------------------------------------------------
// Check / CheckFailure
// ---------------------------------------------------------------------------

/// A monitoring-service rule definition.
///
/// Only `tags` feed into health decisions; the remaining fields are carried
/// for the listing and severity-tag audit commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub id: CheckId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub failing_device_count: u64,
    #[serde(default)]
    pub compatibility: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One instance of a check failing on a specific device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub check_id: CheckId,
    /// Present when the failure has been closed.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the failure occurred.
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
}

impl CheckFailure {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}
