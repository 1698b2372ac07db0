//! File-based token persistence.
//!
//! Tokens are stored in `tokens.json` inside the user's config directory.
//! The file holds a flat string map so the format survives key additions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use papertrade_application::ports::{PersistenceError, TokenPersistence};

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const CACHE_FILE: &str = "tokens.json";
const CONFIG_DIR: &str = "papertrade";

/// Token persistence backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenCache {
    dir: PathBuf,
}

impl FileTokenCache {
    /// Creates a cache rooted at the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a cache under the platform config directory, e.g.
    /// `~/.config/papertrade` on Linux.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory is available.
    pub fn in_user_config() -> Result<Self, PersistenceError> {
        let base = dirs::config_dir().ok_or_else(|| {
            PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no user config directory",
            ))
        })?;
        Ok(Self::new(base.join(CONFIG_DIR)))
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    async fn read_map(path: &Path) -> Result<BTreeMap<String, String>, PersistenceError> {
        match fs::read(path).await {
            Ok(bytes) => from_json_bytes(&bytes)
                .map_err(|e| PersistenceError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PersistenceError::Io(e)),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).await?;
        let bytes = to_json_stable_bytes(map)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        fs::write(self.cache_path(), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenPersistence for FileTokenCache {
    async fn put(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = Self::read_map(&self.cache_path()).await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let map = Self::read_map(&self.cache_path()).await?;
        Ok(map.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        let mut map = Self::read_map(&self.cache_path()).await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path());

        cache.put("session_tokens", r#"{"access":"a"}"#).await.unwrap();
        assert_eq!(
            cache.get("session_tokens").await.unwrap(),
            Some(r#"{"access":"a"}"#.to_string())
        );
        assert!(cache.cache_path().exists());
    }

    #[tokio::test]
    async fn test_get_missing_key_on_fresh_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path());
        assert_eq!(cache.get("session_tokens").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path());
        cache.put("session_tokens", "x").await.unwrap();
        cache.delete("session_tokens").await.unwrap();

        let revived = FileTokenCache::new(dir.path());
        assert_eq!(revived.get("session_tokens").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path());
        tokio::fs::write(cache.cache_path(), b"not json").await.unwrap();

        let result = cache.get("session_tokens").await;
        assert!(matches!(result, Err(PersistenceError::Serialization(_))));
    }
}
