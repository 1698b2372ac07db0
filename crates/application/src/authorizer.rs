//! Bearer stamping for outgoing requests.

use std::sync::Arc;

use papertrade_domain::RequestDescriptor;

use crate::token_store::TokenStore;

/// Header carrying the bearer credential.
const AUTHORIZATION: &str = "Authorization";

/// Stamps outgoing requests with the current access token.
///
/// Requests with no stored token pass through untouched; some endpoints are
/// public. Idempotent: re-authorizing replaces the header in place, so a
/// request can safely be stamped again before a replay.
#[derive(Clone)]
pub struct RequestAuthorizer {
    store: Arc<TokenStore>,
}

impl RequestAuthorizer {
    /// Creates an authorizer reading from the given store.
    #[must_use]
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    /// Attaches the current bearer credential to the request.
    ///
    /// Returns the access token that was attached, if any; the coordinator
    /// uses it to detect a refresh that happened while the request was in
    /// flight.
    pub async fn authorize(&self, request: &mut RequestDescriptor) -> Option<String> {
        let pair = self.store.get().await?;
        request
            .headers
            .insert(AUTHORIZATION.to_string(), pair.authorization_header());
        Some(pair.access_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use papertrade_domain::TokenPair;
    use pretty_assertions::assert_eq;
    use tokio::sync::RwLock;

    use super::*;
    use crate::ports::{PersistenceError, TokenPersistence};

    #[derive(Default)]
    struct MapPersistence {
        entries: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl TokenPersistence for MapPersistence {
        async fn put(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
            self.entries
                .write()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn delete(&self, key: &str) -> Result<(), PersistenceError> {
            self.entries.write().await.remove(key);
            Ok(())
        }
    }

    async fn store_with_token(access: &str) -> Arc<TokenStore> {
        let store = Arc::new(TokenStore::new(Arc::new(MapPersistence::default())));
        store
            .set(TokenPair::new(access, "refresh-1", "bearer", Some(900)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_attaches_bearer_header() {
        let authorizer = RequestAuthorizer::new(store_with_token("access-1").await);
        let mut request = RequestDescriptor::get("/api/auth/me");

        let used = authorizer.authorize(&mut request).await;

        assert_eq!(used, Some("access-1".to_string()));
        assert_eq!(
            request.headers.get(AUTHORIZATION),
            Some(&"bearer access-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_idempotent_restamp() {
        let store = store_with_token("access-1").await;
        let authorizer = RequestAuthorizer::new(Arc::clone(&store));
        let mut request = RequestDescriptor::get("/api/auth/me");

        authorizer.authorize(&mut request).await;
        store
            .set(TokenPair::new("access-2", "refresh-2", "bearer", Some(900)))
            .await
            .unwrap();
        authorizer.authorize(&mut request).await;

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.bearer_token(), Some("access-2"));
    }

    #[tokio::test]
    async fn test_passes_through_without_token() {
        let store = Arc::new(TokenStore::new(Arc::new(MapPersistence::default())));
        let authorizer = RequestAuthorizer::new(store);
        let mut request = RequestDescriptor::get("/api/community/leaderboard");

        let used = authorizer.authorize(&mut request).await;

        assert_eq!(used, None);
        assert!(request.headers.is_empty());
    }
}
