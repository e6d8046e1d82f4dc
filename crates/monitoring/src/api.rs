//! REST API client for the endpoint-monitoring service.
//!
//! All list endpoints are cursor-paginated: each page carries
//! `pagination.next_cursor`, and an empty or missing cursor ends the listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use fleet_health_core::{
    Check, CheckFailure, CheckId, DeviceId, MonitoringClient, MonitoringDevice, UpstreamError,
};

/// Service name used in error messages.
pub const SERVICE: &str = "monitoring service";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://k2.kolide.com/api/v0/";

/// Entries requested per page.
const PAGE_SIZE: u32 = 100;

/// HTTP client for the monitoring API.
pub struct MonitoringApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the monitoring REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum MonitoringApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Monitoring API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The token cannot be sent as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<MonitoringApiError> for UpstreamError {
    fn from(err: MonitoringApiError) -> Self {
        match err {
            MonitoringApiError::Request(e) if e.is_decode() => UpstreamError::Decode {
                service: SERVICE,
                message: e.to_string(),
            },
            MonitoringApiError::ApiError { status, body } => UpstreamError::Api {
                service: SERVICE,
                status,
                body,
            },
            other => UpstreamError::Request {
                service: SERVICE,
                message: other.to_string(),
            },
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default)]
    next_cursor: Option<String>,
}

impl MonitoringApi {
    /// Create a client authenticating with `token`.
    ///
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`].
    /// * `timeout` - Per-request timeout.
    pub fn new(token: &str, base_url: &str, timeout: Duration) -> Result<Self, MonitoringApiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. The caller is
    /// responsible for authentication headers.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET devices`, all pages.
    pub async fn all_devices(&self) -> Result<Vec<MonitoringDevice>, MonitoringApiError> {
        self.get_paginated("devices").await
    }

    /// `GET checks`, all pages.
    pub async fn all_checks(&self) -> Result<Vec<Check>, MonitoringApiError> {
        self.get_paginated("checks").await
    }

    /// `GET checks/{id}`.
    ///
    /// Any 4xx answer means the check is unknown to us and yields `None`.
    pub async fn check(&self, check_id: CheckId) -> Result<Option<Check>, MonitoringApiError> {
        let response = self
            .client
            .get(self.url(&format!("checks/{check_id}")))
            .send()
            .await?;

        if response.status().is_client_error() {
            tracing::warn!(check_id, status = response.status().as_u16(), "Check lookup rejected, treating as untagged");
            return Ok(None);
        }

        let response = Self::ensure_success(response).await?;
        Ok(Some(response.json::<Check>().await?))
    }

    /// `GET devices/{id}/failures`, all pages.
    pub async fn device_failures(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<CheckFailure>, MonitoringApiError> {
        self.get_paginated(&format!("devices/{device_id}/failures")).await
    }

    /// `GET checks/{id}/failures`, all pages.
    pub async fn check_failures(
        &self,
        check_id: CheckId,
    ) -> Result<Vec<CheckFailure>, MonitoringApiError> {
        self.get_paginated(&format!("checks/{check_id}/failures")).await
    }

    // ---- private helpers ----

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Follow `next_cursor` until it runs out, concatenating every page.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, MonitoringApiError> {
        let url = self.url(endpoint);
        let mut entries = Vec::new();
        let mut cursor = String::new();
        let mut pages = 0usize;

        loop {
            let response = self
                .client
                .get(&url)
                .query(&[("per_page", PAGE_SIZE.to_string()), ("cursor", cursor)])
                .send()
                .await?;

            let page: Page<T> = Self::ensure_success(response).await?.json().await?;
            pages += 1;
            entries.extend(page.data);

            match page.pagination.next_cursor {
                Some(next) if !next.is_empty() => cursor = next,
                _ => break,
            }
        }

        tracing::debug!(endpoint, pages, entries = entries.len(), "Fetched paginated listing");
        Ok(entries)
    }

    /// Return the response unchanged on success, or an
    /// [`MonitoringApiError::ApiError`] carrying status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MonitoringApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MonitoringApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MonitoringClient for MonitoringApi {
    async fn list_devices(&self) -> Result<Vec<MonitoringDevice>, UpstreamError> {
        Ok(self.all_devices().await?)
    }

    async fn list_checks(&self) -> Result<Vec<Check>, UpstreamError> {
        Ok(self.all_checks().await?)
    }

    async fn get_check(&self, id: CheckId) -> Result<Option<Check>, UpstreamError> {
        Ok(self.check(id).await?)
    }

    async fn list_device_failures(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<CheckFailure>, UpstreamError> {
        Ok(self.device_failures(device_id).await?)
    }
}
