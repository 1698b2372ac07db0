//! In-memory token persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use papertrade_application::ports::{PersistenceError, TokenPersistence};

/// Token persistence that lives only as long as the process.
///
/// Useful for ephemeral sessions and as a stand-in where no writable
/// config directory exists.
#[derive(Debug, Default)]
pub struct MemoryTokenCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenPersistence for MemoryTokenCache {
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
