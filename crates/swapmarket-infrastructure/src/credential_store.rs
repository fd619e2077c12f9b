//! File-backed credential store implementation.
//!
//! Persists the token and user snapshot as a single flat JSON document
//! under the platform config dir, with an in-memory cache so reads never
//! touch the disk after startup. Every mutation rewrites the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use swapmarket_core::error::{MarketError, Result};
use swapmarket_core::storage::CredentialStore;
use tokio::sync::RwLock;

use crate::paths;

/// JSON-file-backed implementation of `CredentialStore`.
///
/// A corrupt or unreadable file degrades to an empty store with a warning
/// rather than failing startup; the session manager treats the missing
/// credential as unauthenticated, which is the safe outcome.
#[derive(Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl FileCredentialStore {
    /// Opens the store at the default location (`~/.config/swapmarket`).
    pub async fn default_location() -> Result<Self> {
        Self::new(paths::config_dir()?).await
    }

    /// Opens (or initializes) the store under `base_dir`.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        tokio::fs::create_dir_all(base_dir)
            .await
            .map_err(|err| MarketError::storage(format!("Failed to create config dir: {err}")))?;

        let path = paths::credentials_file(base_dir);
        let cache = Self::load(&path).await;

        Ok(Self {
            path,
            cache: Arc::new(RwLock::new(cache)),
        })
    }

    async fn load(path: &Path) -> HashMap<String, String> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                tracing::warn!("Failed to read credential store, starting empty: {err}");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!("Credential store is corrupt, starting empty: {err}");
                HashMap::new()
            }
        }
    }

    async fn persist(&self, values: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(values)?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|err| MarketError::storage(format!("Failed to write credential store: {err}")))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read().await;
        Ok(cache.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        cache.insert(key.to_string(), value.to_string());
        self.persist(&cache).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        if cache.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&cache).await
    }

    async fn clear(&self) -> Result<()> {
        let mut cache = self.cache.write().await;
        if cache.is_empty() {
            return Ok(());
        }
        cache.clear();
        self.persist(&cache).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapmarket_core::storage::{AUTH_TOKEN_KEY, USER_DATA_KEY};

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).await.unwrap();

        store.set(AUTH_TOKEN_KEY, "bearer-1").await.unwrap();
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).await.unwrap(),
            Some("bearer-1".to_string())
        );
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileCredentialStore::new(dir.path()).await.unwrap();
            store.set(AUTH_TOKEN_KEY, "bearer-2").await.unwrap();
            store.set(USER_DATA_KEY, r#"{"id":"u1"}"#).await.unwrap();
        }

        let reopened = FileCredentialStore::new(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get(AUTH_TOKEN_KEY).await.unwrap(),
            Some("bearer-2".to_string())
        );
        assert_eq!(
            reopened.get(USER_DATA_KEY).await.unwrap(),
            Some(r#"{"id":"u1"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).await.unwrap();

        store.set(AUTH_TOKEN_KEY, "bearer-3").await.unwrap();
        store.remove(AUTH_TOKEN_KEY).await.unwrap();
        store.remove(AUTH_TOKEN_KEY).await.unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).await.unwrap();

        store.set(AUTH_TOKEN_KEY, "t").await.unwrap();
        store.set(USER_DATA_KEY, "u").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(USER_DATA_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = paths::credentials_file(dir.path());
        tokio::fs::write(&path, "not json {{").await.unwrap();

        let store = FileCredentialStore::new(dir.path()).await.unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);

        // The store must still be writable afterwards
        store.set(AUTH_TOKEN_KEY, "fresh").await.unwrap();
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).await.unwrap(),
            Some("fresh".to_string())
        );
    }
}
