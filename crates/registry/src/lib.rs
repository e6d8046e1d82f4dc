//! HTTP client for the device registry.
//!
//! Reads the registry's device list and writes updated device state back in
//! a single batch request, authenticating with HTTP basic auth.

pub mod api;

pub use api::{RegistryApi, RegistryApiError, RegistryCredentials, DEFAULT_BASE_URL, SERVICE};
