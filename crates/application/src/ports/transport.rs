//! HTTP transport port.

use async_trait::async_trait;
use papertrade_domain::{ApiError, ApiResponse, RequestDescriptor};

/// Errors that can occur while performing a network call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call did not complete within its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Port for performing a single network call.
///
/// Pure transport: it delivers whatever status the backend returns without
/// interpreting it. The token refresh call uses this directly, bypassing
/// the authorizer and coordinator, so authorization handling never
/// recurses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received (connection
    /// failure, timeout, malformed URL). Status codes are delivered to the
    /// caller untouched.
    async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse, TransportError>;
}
