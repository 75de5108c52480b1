//! Session Store Port - Interface for persisting decision session blobs.
//!
//! The store is a plain key-value map of strings. It knows nothing about
//! topics, criteria or scores; typed encoding lives in the application layer.

use async_trait::async_trait;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for reading and writing session blobs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a blob
    ///
    /// # Returns
    /// `None` when nothing was stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Store a blob, replacing any previous value
    async fn set(&self, key: &str, blob: String) -> Result<(), SessionStoreError>;

    /// Delete every blob whose key starts with `prefix`
    async fn delete_prefix(&self, prefix: &str) -> Result<(), SessionStoreError>;
}
