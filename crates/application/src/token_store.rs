//! Shared token storage with durable persistence.
//!
//! This module provides the single mutable shared resource of the access
//! layer: the current token pair. Every other component reads it; only the
//! store itself and the refresh coordinator write it.

use std::sync::Arc;

use tokio::sync::RwLock;

use papertrade_domain::TokenPair;

use crate::ports::{PersistenceError, TokenPersistence};

/// Key under which the pair is persisted.
const TOKENS_KEY: &str = "session_tokens";

/// Errors that can occur during token store operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// The durable medium failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The cached pair could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Thread-safe token store.
///
/// Holds the current pair in memory and mirrors every `set`/`clear` to
/// durable storage before returning. The write guard is held across the
/// durable write, so a reader arriving after `set` returns sees the new
/// pair, a reader racing the write sees the old one, and no reader ever
/// sees a mix.
pub struct TokenStore {
    current: RwLock<Option<TokenPair>>,
    persistence: Arc<dyn TokenPersistence>,
}

impl TokenStore {
    /// Creates a store backed by the given persistence medium.
    #[must_use]
    pub fn new(persistence: Arc<dyn TokenPersistence>) -> Self {
        Self {
            current: RwLock::new(None),
            persistence,
        }
    }

    /// Seeds the in-memory pair from durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read or holds a corrupt
    /// entry.
    pub async fn load(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        let Some(raw) = self.persistence.get(TOKENS_KEY).await? else {
            return Ok(None);
        };
        let pair: TokenPair = serde_json::from_str(&raw)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        let mut current = self.current.write().await;
        *current = Some(pair.clone());
        Ok(Some(pair))
    }

    /// Replaces the stored pair, durably.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails; the in-memory value is
    /// left unchanged in that case.
    pub async fn set(&self, pair: TokenPair) -> Result<(), TokenStoreError> {
        let raw = serde_json::to_string(&pair)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        let mut current = self.current.write().await;
        self.persistence.put(TOKENS_KEY, &raw).await?;
        *current = Some(pair);
        Ok(())
    }

    /// Returns the current pair, if any.
    pub async fn get(&self) -> Option<TokenPair> {
        self.current.read().await.clone()
    }

    /// Returns the current access token, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|pair| pair.access_token.clone())
    }

    /// Removes the stored pair, durably.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable delete fails; the in-memory value is
    /// left unchanged in that case.
    pub async fn clear(&self) -> Result<(), TokenStoreError> {
        let mut current = self.current.write().await;
        self.persistence.delete(TOKENS_KEY).await?;
        *current = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

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

    fn pair(access: &str) -> TokenPair {
        TokenPair::new(access, "refresh-1", "bearer", Some(900))
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = TokenStore::new(Arc::new(MapPersistence::default()));
        store.set(pair("access-1")).await.unwrap();
        assert_eq!(store.access_token().await, Some("access-1".to_string()));
    }

    #[tokio::test]
    async fn test_clear_removes_pair() {
        let store = TokenStore::new(Arc::new(MapPersistence::default()));
        store.set(pair("access-1")).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.access_token().await, None);
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_wholesale() {
        let store = TokenStore::new(Arc::new(MapPersistence::default()));
        store.set(pair("access-1")).await.unwrap();
        store
            .set(TokenPair::new("access-2", "refresh-2", "bearer", Some(900)))
            .await
            .unwrap();
        let current = store.get().await.unwrap();
        assert_eq!(current.access_token, "access-2");
        assert_eq!(current.refresh_token, "refresh-2");
    }

    #[tokio::test]
    async fn test_persists_across_store_instances() {
        let persistence = Arc::new(MapPersistence::default());
        let store = TokenStore::new(Arc::clone(&persistence) as Arc<dyn TokenPersistence>);
        store.set(pair("access-1")).await.unwrap();

        let revived = TokenStore::new(persistence);
        assert!(revived.get().await.is_none());
        let loaded = revived.load().await.unwrap();
        assert_eq!(loaded.map(|p| p.access_token), Some("access-1".to_string()));
        assert_eq!(revived.access_token().await, Some("access-1".to_string()));
    }

    #[tokio::test]
    async fn test_load_with_empty_medium() {
        let store = TokenStore::new(Arc::new(MapPersistence::default()));
        assert!(store.load().await.unwrap().is_none());
    }
}
