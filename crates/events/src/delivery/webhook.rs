//! Webhook delivery for chat notifications.
//!
//! [`WebhookDelivery`] posts a JSON payload to an incoming-webhook URL.
//! Delivery is a single attempt bounded by a request timeout; a failed post
//! surfaces as a [`WebhookError`] for the caller to report.

use std::time::Duration;

/// HTTP request timeout used by [`WebhookDelivery::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Posts JSON payloads to a webhook endpoint.
pub struct WebhookDelivery {
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a delivery service with [`DEFAULT_TIMEOUT`].
    pub fn new() -> Result<Self, WebhookError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// POST `payload` to `url` and check the response status.
    pub async fn deliver(&self, url: &str, payload: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Webhook delivery rejected");
            return Err(WebhookError::HttpStatus(status.as_u16()));
        }
        tracing::debug!("Webhook delivered");
        Ok(())
    }
}
