//! Request descriptor types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// HTTP method for an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request
    #[default]
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// PATCH request
    Patch,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Returns the method name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Retry tag carried by every request descriptor.
///
/// A request marked `RetriedOnce` is never queued behind a refresh episode
/// again; a further authorization failure is terminal. This bounds every
/// request to a single replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryState {
    /// The request has not been replayed.
    #[default]
    Fresh,
    /// The request was replayed once after a token refresh.
    RetriedOnce,
}

/// Descriptor for one outgoing API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Unique identifier, used as the cancellation key.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute path on the backend, e.g. `/api/portfolio/summary`.
    pub path: String,
    /// Query parameters in append order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Replay bookkeeping for the refresh coordinator.
    pub retry_state: RetryState,
}

impl RequestDescriptor {
    /// Creates a descriptor for the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
            retry_state: RetryState::default(),
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST descriptor.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Marks the request as having used its single replay.
    pub fn mark_retried(&mut self) {
        self.retry_state = RetryState::RetriedOnce;
    }

    /// Returns the bearer token currently stamped on the request, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get("Authorization")
            .and_then(|value| value.split_once(' '))
            .map(|(_, token)| token)
    }
}
