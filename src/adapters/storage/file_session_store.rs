//! File-based Session Store Adapter
//!
//! Stores each session blob as one JSON file under a base directory.
//! Keys map to file names by replacing `:` with `.`, so
//! `<session>:decisionTopic` lands in `<session>.decisionTopic.json`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{SessionStore, SessionStoreError};

const EXTENSION: &str = "json";

/// File-based storage for session blobs
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store with a base directory
    ///
    /// The directory is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    fn file_path(&self, key: &str) -> Result<PathBuf, SessionStoreError> {
        validate_key(key)?;
        Ok(self
            .base_path
            .join(format!("{}.{}", key.replace(':', "."), EXTENSION)))
    }

    /// Ensure directory exists
    async fn ensure_dir(&self, path: &Path) -> Result<(), SessionStoreError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

/// Keys may only contain ASCII letters, digits, `-`, `_` and `:`.
fn validate_key(key: &str) -> Result<(), SessionStoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
    if valid {
        Ok(())
    } else {
        Err(SessionStoreError::InvalidKey(key.to_string()))
    }
}

/// Recovers the key from a stored file name.
fn key_from_file_name(name: &str) -> Option<String> {
    let stem = name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
    Some(stem.replace('.', ":"))
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let file_path = self.file_path(key)?;

        match fs::read_to_string(&file_path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, blob: String) -> Result<(), SessionStoreError> {
        let file_path = self.file_path(key)?;
        self.ensure_dir(&self.base_path).await?;

        fs::write(&file_path, blob)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), SessionStoreError> {
        if !self.base_path.exists() {
            return Ok(());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?
        {
            let name = entry.file_name();
            let matches = name
                .to_str()
                .and_then(key_from_file_name)
                .is_some_and(|key| key.starts_with(prefix));

            if matches {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store
            .set("s1:decisionProducts", r#"["A","B"]"#.to_string())
            .await
            .unwrap();

        let loaded = store.get("s1:decisionProducts").await.unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"["A","B"]"#));
    }

    #[tokio::test]
    async fn test_file_store_get_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("not-created-yet"));

        assert_eq!(store.get("s1:decisionTopic").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_creates_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("sessions");
        let store = FileSessionStore::new(&base);

        store.set("k", "v".to_string()).await.unwrap();

        assert!(base.join("k.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_key_maps_to_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.set("s1:decisionTopic", "x".to_string()).await.unwrap();

        assert!(temp_dir.path().join("s1.decisionTopic.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        for key in ["../escape", "a/b", "a.b", ""] {
            let result = store.set(key, "x".to_string()).await;
            assert!(
                matches!(result, Err(SessionStoreError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_file_store_delete_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.set("s1:decisionTopic", "a".to_string()).await.unwrap();
        store.set("s1:decisionScores", "b".to_string()).await.unwrap();
        store.set("s2:decisionTopic", "c".to_string()).await.unwrap();

        store.delete_prefix("s1:").await.unwrap();

        assert_eq!(store.get("s1:decisionTopic").await.unwrap(), None);
        assert_eq!(store.get("s1:decisionScores").await.unwrap(), None);
        assert_eq!(store.get("s2:decisionTopic").await.unwrap().as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_file_store_delete_prefix_without_dir_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("missing"));

        assert!(store.delete_prefix("s1:").await.is_ok());
    }

    #[test]
    fn test_key_from_file_name() {
        assert_eq!(
            key_from_file_name("s1.decisionTopic.json").as_deref(),
            Some("s1:decisionTopic")
        );
        assert_eq!(key_from_file_name("notes.txt"), None);
    }
}
