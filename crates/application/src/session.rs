//! Observable session state.

use papertrade_domain::{Session, UserProfile};
use tokio::sync::watch;

/// Holds the current [`Session`] and notifies observers when it changes.
///
/// Purely reactive: the session only changes in response to login, logout,
/// profile fetches and auth revocation. UI layers subscribe and rerender on
/// change.
pub struct SessionContext {
    tx: watch::Sender<Session>,
}

impl SessionContext {
    /// Creates a context starting unauthenticated.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Session::unauthenticated());
        Self { tx }
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Promotes the session with a fresh profile.
    pub(crate) fn set_user(&self, user: UserProfile) {
        self.tx.send_replace(Session::authenticated(user));
    }

    /// Drops back to the unauthenticated state.
    pub(crate) fn downgrade(&self) {
        self.tx.send_replace(Session::unauthenticated());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
