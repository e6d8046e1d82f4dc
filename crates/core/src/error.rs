/// Failure talking to one of the two upstream services.
///
/// Client crates convert their transport-level errors into this type so the
/// reconciliation driver can propagate them without knowing about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("{service} request failed: {message}")]
    Request {
        service: &'static str,
        message: String,
    },

    /// The service answered with a non-2xx status code.
    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("{service} returned an unexpected payload: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}
