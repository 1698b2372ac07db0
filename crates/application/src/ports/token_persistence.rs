//! Durable key-value persistence port backing the token store.

use async_trait::async_trait;

/// Errors that can occur during persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for the durable storage medium behind the token store.
///
/// The concrete medium (config-dir file, keychain, browser storage) is an
/// external collaborator; the store only requires these three operations.
#[async_trait]
pub trait TokenPersistence: Send + Sync {
    /// Stores a value under the given key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written durably.
    async fn put(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Reads the value stored under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Removes the value stored under the given key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be made durable.
    async fn delete(&self, key: &str) -> Result<(), PersistenceError>;
}
