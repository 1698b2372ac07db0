//! Error taxonomy for authenticated API calls.

use thiserror::Error;

/// Errors surfaced by the authenticated API access layer.
///
/// Only `AuthExpired` is handled internally (it drives the refresh
/// coordinator); every other kind propagates to the original caller
/// unchanged. `AuthDenied` is always accompanied by token clearing and a
/// session downgrade broadcast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable response was received from the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The access token was rejected (401). Intercepted internally by the
    /// refresh coordinator; callers only see it indirectly as `AuthDenied`
    /// when the refresh episode itself fails.
    #[error("access token rejected")]
    AuthExpired,

    /// Terminal authorization failure: the refresh call failed, or a
    /// request that already used its single retry was rejected again.
    #[error("authorization denied: {0}")]
    AuthDenied(String),

    /// The backend refused the operation for this user (403). Never
    /// retried, never clears the session.
    #[error("operation forbidden")]
    Forbidden,

    /// The backend rejected the request as invalid (other 4xx).
    #[error("validation error ({status}): {message}")]
    Validation {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable detail extracted from the response body.
        message: String,
    },

    /// The backend failed to process the request (5xx).
    #[error("server error ({status})")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
    },

    /// The request was cancelled while queued behind a refresh episode.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Returns true for the terminal authorization failure kind.
    #[must_use]
    pub const fn is_terminal_auth(&self) -> bool {
        matches!(self, Self::AuthDenied(_))
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
