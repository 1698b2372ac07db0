//! Single-flight token refresh coordination.
//!
//! When a request comes back `401`, the access token has expired and must be
//! exchanged before the request can be replayed. Under concurrency many
//! requests can expire at once; the coordinator guarantees that exactly one
//! refresh call reaches the backend per expiry episode, parks every other
//! affected request, and replays them in arrival order once the new pair is
//! stored.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, oneshot};
use uuid::Uuid;

use papertrade_domain::{
    ApiError, ApiResponse, ApiResult, RequestDescriptor, RetryState, TokenResponse,
};

use crate::authorizer::RequestAuthorizer;
use crate::ports::HttpTransport;
use crate::token_store::TokenStore;

/// Token exchange endpoint. Called directly through the transport so the
/// refresh itself never passes through authorization handling.
const REFRESH_PATH: &str = "/api/auth/refresh";

/// Capacity of the auth event channel.
const EVENT_CAPACITY: usize = 16;

/// Lifecycle notifications emitted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A refresh succeeded and a new token pair is in the store.
    Refreshed,
    /// The session is no longer valid and tokens have been cleared.
    Revoked,
}

/// Coordinator refresh state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No refresh in progress.
    #[default]
    Idle,
    /// A refresh call is in flight; new arrivals queue.
    Refreshing,
    /// The last refresh failed terminally; re-authentication is required.
    Failed,
}

/// A request parked while a refresh is in flight.
struct PendingRequest {
    request: RequestDescriptor,
    tx: oneshot::Sender<ApiResult<ApiResponse>>,
}

/// State guarded by the coordinator mutex.
#[derive(Default)]
struct CoordinatorInner {
    state: CoordinatorState,
    pending: VecDeque<PendingRequest>,
}

/// Serializes token refreshes and replays the requests they unblock.
pub struct RefreshCoordinator {
    inner: Mutex<CoordinatorInner>,
    store: Arc<TokenStore>,
    authorizer: RequestAuthorizer,
    transport: Arc<dyn HttpTransport>,
    refresh_timeout: Duration,
    events: broadcast::Sender<AuthEvent>,
}

impl RefreshCoordinator {
    /// Creates a coordinator over the given store and transport.
    #[must_use]
    pub fn new(
        store: Arc<TokenStore>,
        transport: Arc<dyn HttpTransport>,
        refresh_timeout: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(CoordinatorInner::default()),
            authorizer: RequestAuthorizer::new(Arc::clone(&store)),
            store,
            transport,
            refresh_timeout,
            events,
        }
    }

    /// Subscribes to auth lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Returns the current refresh state.
    pub async fn state(&self) -> CoordinatorState {
        self.inner.lock().await.state
    }

    /// Returns the coordinator to `Idle` after a fresh login.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.state = CoordinatorState::Idle;
    }

    /// Removes a queued request by id before it is replayed.
    ///
    /// Returns `true` if the request was found and removed; its caller
    /// receives [`ApiError::Cancelled`]. Requests already replayed (or never
    /// queued) are unaffected.
    pub async fn cancel(&self, id: Uuid) -> bool {
        let mut inner = self.inner.lock().await;
        let Some(position) = inner.pending.iter().position(|p| p.request.id == id) else {
            return false;
        };
        // remove preserves FIFO order of the remaining queue
        if let Some(pending) = inner.pending.remove(position) {
            let _ = pending.tx.send(Err(ApiError::Cancelled));
            return true;
        }
        false
    }

    /// Handles a request that was rejected with `401`.
    ///
    /// `token_used` is the access token the request carried when it failed;
    /// if the store already holds a different one, another caller refreshed
    /// while this request was in flight and it is replayed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthDenied`] when the episode fails terminally,
    /// [`ApiError::Cancelled`] when the request is removed from the queue,
    /// or whatever the replay itself produces.
    pub async fn on_auth_expired(
        self: Arc<Self>,
        request: RequestDescriptor,
        token_used: Option<String>,
    ) -> ApiResult<ApiResponse> {
        if request.retry_state == RetryState::RetriedOnce {
            // The replay was rejected too: the refreshed token is not
            // accepted, so the session is gone.
            self.revoke("replayed request rejected again").await;
            return Err(ApiError::AuthDenied(
                "session rejected after token refresh".to_string(),
            ));
        }

        let rx = {
            let mut inner = self.inner.lock().await;
            match inner.state {
                CoordinatorState::Failed => {
                    return Err(ApiError::AuthDenied(
                        "session expired; log in again".to_string(),
                    ));
                }
                CoordinatorState::Refreshing => {
                    let (tx, rx) = oneshot::channel();
                    inner.pending.push_back(PendingRequest { request, tx });
                    rx
                }
                CoordinatorState::Idle => {
                    let current = self.store.access_token().await;
                    if current.is_some() && current != token_used {
                        // Another caller already refreshed while this request
                        // was in flight; replay with the newer token.
                        drop(inner);
                        return self.resend(request).await;
                    }

                    let Some(pair) = self.store.get().await else {
                        inner.state = CoordinatorState::Failed;
                        drop(inner);
                        self.clear_and_notify().await;
                        return Err(ApiError::AuthDenied(
                            "no refresh token available".to_string(),
                        ));
                    };

                    inner.state = CoordinatorState::Refreshing;
                    let (tx, rx) = oneshot::channel();
                    inner.pending.push_back(PendingRequest { request, tx });
                    drop(inner);

                    let coordinator = Arc::clone(&self);
                    tokio::spawn(async move {
                        coordinator.run_refresh(pair.refresh_token).await;
                    });
                    rx
                }
            }
        };

        rx.await.unwrap_or(Err(ApiError::Cancelled))
    }

    /// Performs the refresh call and settles the pending queue.
    async fn run_refresh(self: Arc<Self>, refresh_token: String) {
        tracing::debug!("starting token refresh");
        match self.call_refresh_endpoint(&refresh_token).await {
            Ok(tokens) => {
                if let Err(error) = self.store.set(tokens.into()).await {
                    tracing::error!(%error, "failed to store refreshed tokens");
                    self.fail_episode("token storage failed").await;
                    return;
                }

                let pending = {
                    let mut inner = self.inner.lock().await;
                    inner.state = CoordinatorState::Idle;
                    std::mem::take(&mut inner.pending)
                };
                let _ = self.events.send(AuthEvent::Refreshed);
                tracing::info!(replayed = pending.len(), "token refresh succeeded");

                for PendingRequest { request, tx } in pending {
                    let result = self.resend(request).await;
                    let _ = tx.send(result);
                }
            }
            Err(reason) => {
                tracing::warn!(%reason, "token refresh failed");
                self.fail_episode(&reason).await;
            }
        }
    }

    /// Exchanges the refresh token at the backend.
    async fn call_refresh_endpoint(&self, refresh_token: &str) -> Result<TokenResponse, String> {
        let request = RequestDescriptor::post(REFRESH_PATH)
            .with_body(serde_json::json!({ "refresh_token": refresh_token }));

        let send = self.transport.send(&request);
        let response = tokio::time::timeout(self.refresh_timeout, send)
            .await
            .map_err(|_| format!("refresh timed out after {:?}", self.refresh_timeout))?
            .map_err(|e| e.to_string())?;

        if !response.is_success() {
            return Err(format!(
                "refresh rejected with status {}: {}",
                response.status,
                response.error_detail()
            ));
        }
        response
            .json::<TokenResponse>()
            .map_err(|e| format!("malformed refresh response: {e}"))
    }

    /// Replays a request once with the current token.
    async fn resend(&self, mut request: RequestDescriptor) -> ApiResult<ApiResponse> {
        request.mark_retried();
        self.authorizer.authorize(&mut request).await;
        let response = self.transport.send(&request).await.map_err(ApiError::from)?;
        match response.classify() {
            Err(ApiError::AuthExpired) => {
                self.revoke("replayed request rejected again").await;
                Err(ApiError::AuthDenied(
                    "session rejected after token refresh".to_string(),
                ))
            }
            other => other,
        }
    }

    /// Marks the episode as terminally failed and fans the failure out.
    async fn fail_episode(&self, reason: &str) {
        let pending = {
            let mut inner = self.inner.lock().await;
            inner.state = CoordinatorState::Failed;
            std::mem::take(&mut inner.pending)
        };
        self.clear_and_notify().await;
        for PendingRequest { tx, .. } in pending {
            let _ = tx.send(Err(ApiError::AuthDenied(reason.to_string())));
        }
    }

    /// Moves to `Failed` (unless a refresh is mid-flight) and clears tokens.
    async fn revoke(&self, reason: &str) {
        tracing::warn!(reason, "session revoked");
        {
            let mut inner = self.inner.lock().await;
            if inner.state != CoordinatorState::Refreshing {
                inner.state = CoordinatorState::Failed;
            }
        }
        self.clear_and_notify().await;
    }

    /// Removes stored tokens and broadcasts the downgrade.
    async fn clear_and_notify(&self) {
        if let Err(error) = self.store.clear().await {
            tracing::warn!(%error, "failed to clear stored tokens");
        }
        let _ = self.events.send(AuthEvent::Revoked);
    }
}
