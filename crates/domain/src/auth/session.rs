//! Session and user profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current user as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Current paper trading balance.
    pub paper_balance: f64,
    /// Balance the account started with.
    pub initial_balance: f64,
    /// Total return since account creation, in percent.
    pub total_return_percentage: f64,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Most recent login timestamp, if any.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Derived authenticated/unauthenticated view consumed by the UI layer.
///
/// Recomputed whenever the token pair changes or a profile fetch completes;
/// UI code never mutates it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The current user, when known.
    pub user: Option<UserProfile>,
    /// Whether a valid token pair is held.
    pub authenticated: bool,
}

impl Session {
    /// Session with no user and no credentials.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            user: None,
            authenticated: false,
        }
    }

    /// Session for an authenticated user.
    #[must_use]
    pub const fn authenticated(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            authenticated: true,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}
