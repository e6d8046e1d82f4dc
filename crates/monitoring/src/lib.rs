//! HTTP client for the endpoint-monitoring service.
//!
//! Wraps the monitoring REST API (devices, checks, failures) using
//! [`reqwest`], following cursor pagination transparently, and implements
//! [`MonitoringClient`](fleet_health_core::MonitoringClient) for the
//! reconciliation driver.

pub mod api;

pub use api::{MonitoringApi, MonitoringApiError, DEFAULT_BASE_URL, SERVICE};
