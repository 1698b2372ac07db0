//! Response type and status classification.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Raw response delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Time taken by the call.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for the target type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Extracts the backend's error detail from the body, falling back to
    /// the raw body text.
    #[must_use]
    pub fn error_detail(&self) -> String {
        #[derive(serde::Deserialize)]
        struct Detail {
            detail: serde_json::Value,
        }

        if let Ok(parsed) = serde_json::from_slice::<Detail>(&self.body) {
            match parsed.detail {
                serde_json::Value::String(message) => return message,
                other => return other.to_string(),
            }
        }
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Classifies the response per the dashboard error taxonomy.
    ///
    /// 2xx passes through; 401 maps to `AuthExpired` (the refresh path),
    /// 403 to `Forbidden`, other 4xx to `Validation`, everything else to
    /// `Server`.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`ApiError`] for any non-2xx status.
    pub fn classify(self) -> Result<Self, ApiError> {
        match self.status {
            200..=299 => Ok(self),
            401 => Err(ApiError::AuthExpired),
            403 => Err(ApiError::Forbidden),
            400..=499 => {
                let message = self.error_detail();
                Err(ApiError::Validation {
                    status: self.status,
                    message,
                })
            }
            status => Err(ApiError::Server { status }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_success_passes_through() {
        let classified = response(200, r#"{"ok":true}"#).classify();
        assert!(classified.is_ok());
    }

    #[test]
    fn test_unauthorized_maps_to_auth_expired() {
        assert_eq!(
            response(401, r#"{"detail":"Could not validate credentials"}"#).classify(),
            Err(ApiError::AuthExpired)
        );
    }

    #[test]
    fn test_forbidden_is_not_refresh_path() {
        assert_eq!(response(403, "").classify(), Err(ApiError::Forbidden));
    }

    #[test]
    fn test_validation_carries_detail() {
        let classified = response(422, r#"{"detail":"quantity must be positive"}"#).classify();
        assert_eq!(
            classified,
            Err(ApiError::Validation {
                status: 422,
                message: "quantity must be positive".to_string(),
            })
        );
    }

    #[test]
    fn test_server_error_range() {
        assert_eq!(
            response(503, "upstream down").classify(),
            Err(ApiError::Server { status: 503 })
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(response(400, "plain text").error_detail(), "plain text");
    }

    #[test]
    fn test_json_decode() {
        #[derive(serde::Deserialize)]
        struct Body {
            ok: bool,
        }
        let body: Body = response(200, r#"{"ok":true}"#).json().unwrap();
        assert!(body.ok);
    }
}
