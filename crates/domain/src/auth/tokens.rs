//! Token pair value type and its wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair with expiry metadata.
///
/// An immutable value: it is created on login, replaced wholesale on a
/// successful refresh, and deleted on logout or terminal refresh failure.
/// It is never partially updated, so a reader always observes a matching
/// access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived credential attached to authenticated requests.
    pub access_token: String,
    /// Longer-lived credential used solely to mint a new access token.
    pub refresh_token: String,
    /// Authorization scheme, usually "bearer".
    pub token_type: String,
    /// When the access token expires (if known).
    pub expires_at: Option<DateTime<Utc>>,
    /// When this pair was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl TokenPair {
    /// Creates a new pair with the current timestamp.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in_secs: Option<u64>,
    ) -> Self {
        let now = Utc::now();
        let expires_at =
            expires_in_secs.map(|secs| now + chrono::Duration::seconds(secs.cast_signed()));

        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.into(),
            expires_at,
            obtained_at: now,
        }
    }

    /// Returns the `Authorization` header value for this pair.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Checks whether the access token is expired or will expire within the
    /// given buffer.
    #[must_use]
    pub fn is_expired_or_expiring(&self, buffer_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            Utc::now() + chrono::Duration::seconds(buffer_seconds) >= expires_at
        })
    }

    /// Time until expiry in seconds, or None if no expiry is known.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }
}

/// Token endpoint response as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Refresh token; rotated on every refresh.
    pub refresh_token: String,
    /// Authorization scheme.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(
            response.access_token,
            response.refresh_token,
            response.token_type,
            response.expires_in,
        )
    }
}
