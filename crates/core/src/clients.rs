//! Seams to the two upstream services.
//!
//! The reconciliation driver only talks to these traits; the HTTP
//! implementations live in `fleet-health-monitoring` and
//! `fleet-health-registry`. List operations return complete results:
//! pagination is the implementation's concern.

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::types::{Check, CheckFailure, CheckId, DeviceId, MonitoringDevice, RegistryDevice};

/// Read access to the endpoint-monitoring service.
#[async_trait]
pub trait MonitoringClient: Send + Sync {
    /// Every device known to the service.
    async fn list_devices(&self) -> Result<Vec<MonitoringDevice>, UpstreamError>;

    /// Every check defined in the account.
    async fn list_checks(&self) -> Result<Vec<Check>, UpstreamError>;

    /// A single check, or `None` when the service does not know it.
    async fn get_check(&self, id: CheckId) -> Result<Option<Check>, UpstreamError>;

    /// Open and resolved failures recorded for one device.
    async fn list_device_failures(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<CheckFailure>, UpstreamError>;
}

/// Read/write access to the device registry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn list_devices(&self) -> Result<Vec<RegistryDevice>, UpstreamError>;

    /// Replace the stored state of the given devices in one request.
    async fn update_devices(&self, devices: &[RegistryDevice]) -> Result<(), UpstreamError>;
}
