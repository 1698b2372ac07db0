//! API client facade.
//!
//! Ties the token store, authorizer, refresh coordinator and session
//! context together behind one entry point. Callers issue requests through
//! [`ApiClient::execute`] and never see token expiry: a `401` is absorbed,
//! the token refreshed, and the request replayed transparently.

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde_json::json;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use papertrade_domain::{
    ApiError, ApiResponse, ApiResult, Credentials, LoginResponse, RegisterReceipt, Registration,
    RequestDescriptor, Session, UserProfile,
};

use crate::authorizer::RequestAuthorizer;
use crate::coordinator::{AuthEvent, RefreshCoordinator};
use crate::ports::{HttpTransport, TokenPersistence};
use crate::session::SessionContext;
use crate::token_store::TokenStore;

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const PROFILE_PATH: &str = "/api/auth/me";

/// Client tuning knobs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for a single token refresh call.
    pub refresh_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_timeout: Duration::from_secs(10),
        }
    }
}

/// Authenticated access to the trading backend.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    store: Arc<TokenStore>,
    authorizer: RequestAuthorizer,
    coordinator: Arc<RefreshCoordinator>,
    session: SessionContext,
}

impl ApiClient {
    /// Creates a client over the given transport and persistence medium.
    ///
    /// Spawns a background task that keeps the session context in step with
    /// coordinator events: a successful refresh re-fetches the profile, a
    /// revocation downgrades the session.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        persistence: Arc<dyn TokenPersistence>,
        config: ClientConfig,
    ) -> Arc<Self> {
        let store = Arc::new(TokenStore::new(persistence));
        let coordinator = Arc::new(RefreshCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&transport),
            config.refresh_timeout,
        ));
        let client = Arc::new(Self {
            authorizer: RequestAuthorizer::new(Arc::clone(&store)),
            transport,
            store,
            coordinator,
            session: SessionContext::new(),
        });

        let events = client.coordinator.subscribe();
        tokio::spawn(Self::watch_auth_events(Arc::downgrade(&client), events));
        client
    }

    /// Mirrors coordinator events into the session context.
    ///
    /// Holds only a weak handle so the client can be dropped while this
    /// task is parked on the channel.
    async fn watch_auth_events(
        client: Weak<Self>,
        mut events: broadcast::Receiver<AuthEvent>,
    ) {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let Some(client) = client.upgrade() else {
                break;
            };
            match event {
                AuthEvent::Refreshed => {
                    if let Err(error) = client.refresh_profile().await {
                        tracing::debug!(%error, "profile fetch after refresh failed");
                    }
                }
                AuthEvent::Revoked => client.session.downgrade(),
            }
        }
    }

    /// Restores a persisted session at startup.
    ///
    /// Loads cached tokens and, if present, validates them by fetching the
    /// profile. Returns the resulting session; an unreadable cache or a
    /// rejected token leaves the client unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error for transport and server failures during the
    /// profile fetch. A denied session is not an error: the cache is
    /// cleared and the unauthenticated session is returned.
    pub async fn initialize(&self) -> ApiResult<Session> {
        match self.store.load().await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(self.session.session()),
            Err(error) => {
                tracing::warn!(%error, "token cache unreadable; starting unauthenticated");
                return Ok(self.session.session());
            }
        }

        match self.refresh_profile().await {
            Ok(()) => Ok(self.session.session()),
            Err(ApiError::AuthDenied(_)) => {
                self.session.downgrade();
                Ok(self.session.session())
            }
            Err(error) => Err(error),
        }
    }

    /// Fetches the profile and promotes the session.
    async fn refresh_profile(&self) -> ApiResult<()> {
        let response = self.execute(RequestDescriptor::get(PROFILE_PATH)).await?;
        let user: UserProfile = response
            .json()
            .map_err(|e| ApiError::Transport(format!("malformed profile response: {e}")))?;
        self.session.set_user(user);
        Ok(())
    }

    /// Authenticates with email and password.
    ///
    /// Goes straight through the transport: a rejected login is a
    /// credential problem, not an expired token, so it must not trigger a
    /// refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the backend rejects the
    /// credentials, [`ApiError::Transport`] when no response was received.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let request = RequestDescriptor::post(LOGIN_PATH).with_body(json!({
            "email": credentials.email,
            "password": credentials.password,
        }));
        let response = self.transport.send(&request).await.map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Validation {
                status: response.status,
                message: response.error_detail(),
            });
        }

        let login: LoginResponse = response
            .json()
            .map_err(|e| ApiError::Transport(format!("malformed login response: {e}")))?;
        self.store
            .set(login.tokens.into())
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.coordinator.reset().await;
        self.session.set_user(login.user);
        tracing::info!("login succeeded");
        Ok(self.session.session())
    }

    /// Creates a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the backend rejects the
    /// registration.
    pub async fn register(&self, registration: &Registration) -> ApiResult<RegisterReceipt> {
        let request = RequestDescriptor::post(REGISTER_PATH).with_body(json!({
            "email": registration.email,
            "username": registration.username,
            "password": registration.password,
        }));
        let response = self.transport.send(&request).await.map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Validation {
                status: response.status,
                message: response.error_detail(),
            });
        }
        response
            .json()
            .map_err(|e| ApiError::Transport(format!("malformed register response: {e}")))
    }

    /// Ends the session locally: clears tokens and downgrades.
    pub async fn logout(&self) {
        if let Err(error) = self.store.clear().await {
            tracing::warn!(%error, "failed to clear tokens on logout");
        }
        self.coordinator.reset().await;
        self.session.downgrade();
    }

    /// Issues an authorized request, refreshing the token transparently.
    ///
    /// # Errors
    ///
    /// Returns the classified failure: [`ApiError::AuthDenied`] when the
    /// session cannot be recovered, [`ApiError::Validation`] and
    /// [`ApiError::Server`] for backend rejections, [`ApiError::Transport`]
    /// for network failures, [`ApiError::Cancelled`] if the request was
    /// cancelled while queued.
    pub async fn execute(&self, mut request: RequestDescriptor) -> ApiResult<ApiResponse> {
        let token_used = self.authorizer.authorize(&mut request).await;
        let response = self.transport.send(&request).await.map_err(ApiError::from)?;
        match response.classify() {
            Err(ApiError::AuthExpired) => {
                Arc::clone(&self.coordinator)
                    .on_auth_expired(request, token_used)
                    .await
            }
            other => other,
        }
    }

    /// Cancels a request queued behind an in-flight refresh.
    pub async fn cancel(&self, id: Uuid) -> bool {
        self.coordinator.cancel(id).await
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.session()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Returns the underlying token store.
    #[must_use]
    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.store
    }
}
