//! In-Memory Session Store Adapter
//!
//! Stores session blobs in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session blobs
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.blobs.write().await.clear();
    }

    /// Get the number of stored blobs
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: String) -> Result<(), SessionStoreError> {
        self.blobs.write().await.insert(key.to_string(), blob);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), SessionStoreError> {
        self.blobs
            .write()
            .await
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
