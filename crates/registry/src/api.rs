//! REST API client for the device registry.

use std::time::Duration;

use async_trait::async_trait;

use fleet_health_core::{RegistryClient, RegistryDevice, UpstreamError};

/// Service name used in error messages.
pub const SERVICE: &str = "device registry";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Basic-auth credentials for the registry.
#[derive(Clone)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP client for the device registry.
pub struct RegistryApi {
    client: reqwest::Client,
    base_url: String,
    credentials: RegistryCredentials,
}

/// Errors from the registry REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum RegistryApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry returned a non-2xx status code.
    #[error("Registry API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<RegistryApiError> for UpstreamError {
    fn from(err: RegistryApiError) -> Self {
        match err {
            RegistryApiError::Request(e) if e.is_decode() => UpstreamError::Decode {
                service: SERVICE,
                message: e.to_string(),
            },
            RegistryApiError::Request(e) => UpstreamError::Request {
                service: SERVICE,
                message: e.to_string(),
            },
            RegistryApiError::ApiError { status, body } => UpstreamError::Api {
                service: SERVICE,
                status,
                body,
            },
        }
    }
}

impl RegistryApi {
    /// Create a registry client.
    ///
    /// * `base_url` - API root, e.g. `https://registry.example.com`.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: &str,
        credentials: RegistryCredentials,
        timeout: Duration,
    ) -> Result<Self, RegistryApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, credentials))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        credentials: RegistryCredentials,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// `GET /devices`.
    pub async fn devices(&self) -> Result<Vec<RegistryDevice>, RegistryApiError> {
        let response = self
            .client
            .get(self.devices_url())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let devices: Vec<RegistryDevice> = Self::ensure_success(response).await?.json().await?;
        tracing::debug!(count = devices.len(), "Fetched registry devices");
        Ok(devices)
    }

    /// `PUT /devices` with the full batch as a JSON array.
    pub async fn put_devices(&self, devices: &[RegistryDevice]) -> Result<(), RegistryApiError> {
        let response = self
            .client
            .put(self.devices_url())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(devices)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        tracing::debug!(count = devices.len(), "Updated registry devices");
        Ok(())
    }

    // ---- private helpers ----

    fn devices_url(&self) -> String {
        format!("{}/devices", self.base_url)
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RegistryApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RegistryApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RegistryClient for RegistryApi {
    async fn list_devices(&self) -> Result<Vec<RegistryDevice>, UpstreamError> {
        Ok(self.devices().await?)
    }

    async fn update_devices(&self, devices: &[RegistryDevice]) -> Result<(), UpstreamError> {
        Ok(self.put_devices(devices).await?)
    }
}
