//! Login and registration DTOs.

use serde::{Deserialize, Serialize};

use super::{TokenResponse, UserProfile};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password, sent only over the login call.
    pub password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Account email address.
    pub email: String,
    /// Username, 3-50 alphanumeric characters or underscores.
    pub username: String,
    /// Password, minimum 8 characters with mixed case and a digit.
    pub password: String,
}

/// Registration response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReceipt {
    /// Identifier of the newly created user.
    pub id: String,
    /// Registered email address.
    pub email: String,
    /// Registered username.
    pub username: String,
    /// Server confirmation message.
    pub message: String,
}

/// Login response body: the user plus a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: UserProfile,
    /// Freshly issued tokens.
    pub tokens: TokenResponse,
}
