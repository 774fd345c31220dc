//! Blob storage contract and local filesystem implementation
//!
//! The cache core needs three operations from durable storage: a cheap
//! metadata probe, a payload read, and a whole-value overwrite. Anything
//! exposing a last-written-at timestamp per key can implement
//! [`BlobStore`]; [`LocalBlobStore`] does it on the local filesystem with a
//! JSON sidecar standing in for the last-modified metadata a blob service
//! provides natively.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::{Result, ensure_dir};

/// Sidecar metadata stored next to each payload
#[derive(Debug, Serialize, Deserialize)]
pub struct BlobMeta {
    /// Unix timestamp when the payload was written
    pub cached_at: u64,
    /// Payload size in bytes
    pub size: usize,
}

/// Metadata handle for a stored blob
#[derive(Debug, Clone)]
pub struct BlobHandle {
    /// Storage key the handle refers to
    pub key: String,
    /// When the payload was last written; `None` when the sidecar is
    /// missing or unreadable, which callers must treat as unknown age
    pub cached_at: Option<SystemTime>,
}

/// Narrow key-value contract over durable blob storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Cheap existence and metadata probe; must not read the payload
    async fn probe(&self, key: &str) -> Option<BlobHandle>;

    /// Read the stored payload bytes; `None` when absent or unreadable
    async fn read(&self, key: &str) -> Option<Vec<u8>>;

    /// Persist payload bytes at the key, replacing any prior value
    async fn write(&self, key: &str, data: &[u8]) -> Result<()>;
}

/// Typed read over any [`BlobStore`]
///
/// Deserialization failure maps to absent, never to an error: a stored
/// payload that no longer parses is simply not data.
pub async fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: BlobStore + ?Sized,
{
    let bytes = store.read(key).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!("Stored payload at {} no longer parses: {}", key, error);
            None
        }
    }
}

/// Filesystem-backed blob store
pub struct LocalBlobStore {
    /// Base directory for this store
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at the default cache directory
    pub async fn new() -> Result<Self> {
        Self::with_root(crate::get_cache_dir()?.join("blobs")).await
    }

    /// Create a store rooted at a custom directory
    pub async fn with_root(root: PathBuf) -> Result<Self> {
        ensure_dir(&root).await?;

        debug!("Initialized local blob store at: {:?}", root);

        Ok(Self { root })
    }

    /// Get the base directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full filesystem path for a payload key
    pub fn payload_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Sidecar path for a payload key
    fn meta_path(&self, key: &str) -> PathBuf {
        let mut path = self.payload_path(key);
        path.set_extension("meta");
        path
    }

    /// Remove every entry in this store
    pub async fn clear(&self) -> Result<()> {
        debug!("Clearing all entries in blob store");
        clear_directory_recursively(&self.root).await
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn probe(&self, key: &str) -> Option<BlobHandle> {
        tokio::fs::metadata(self.payload_path(key)).await.ok()?;

        let cached_at = match tokio::fs::read_to_string(self.meta_path(key)).await {
            Ok(raw) => serde_json::from_str::<BlobMeta>(&raw)
                .ok()
                .map(|meta| UNIX_EPOCH + Duration::from_secs(meta.cached_at)),
            Err(_) => None,
        };

        Some(BlobHandle {
            key: key.to_string(),
            cached_at,
        })
    }

    async fn read(&self, key: &str) -> Option<Vec<u8>> {
        trace!("Reading blob key: {}", key);
        tokio::fs::read(self.payload_path(key)).await.ok()
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let payload_path = self.payload_path(key);

        if let Some(parent) = payload_path.parent() {
            ensure_dir(parent).await?;
        }

        trace!("Writing {} bytes to blob key: {}", data.len(), key);
        tokio::fs::write(&payload_path, data).await?;

        let meta = BlobMeta {
            cached_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            size: data.len(),
        };
        tokio::fs::write(self.meta_path(key), serde_json::to_string_pretty(&meta)?).await?;

        Ok(())
    }
}

/// Recursively clear all files in a directory
fn clear_directory_recursively(
    dir: &Path,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + '_>> {
    Box::pin(async move {
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Ok(metadata) = tokio::fs::metadata(&path).await {
                if metadata.is_dir() {
                    clear_directory_recursively(&path).await?;
                } else {
                    tokio::fs::remove_file(&path).await?;
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_write_probe_read_cycle() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        let key = "player-service-record/noble-six.json";
        let data = br#"{"Status": 1, "Gamertag": "Noble Six"}"#;

        store.write(key, data).await.unwrap();

        let handle = store.probe(key).await.unwrap();
        assert_eq!(handle.key, key);
        assert!(handle.cached_at.is_some());

        let read_back = store.read(key).await.unwrap();
        assert_eq!(read_back, data);
    }

    #[tokio::test]
    async fn test_probe_absent_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        assert!(store.probe("other/metadata.json").await.is_none());
        assert!(store.read("other/metadata.json").await.is_none());
    }

    #[tokio::test]
    async fn test_probe_without_sidecar_has_unknown_age() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        // Payload written outside the store, no sidecar
        let path = temp_dir.path().join("other").join("metadata.json");
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, b"{}").await.unwrap();

        let handle = store.probe("other/metadata.json").await.unwrap();
        assert!(handle.cached_at.is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_prior_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        let key = "other/playlists.json";
        store.write(key, b"first").await.unwrap();
        store.write(key, b"second").await.unwrap();

        assert_eq!(store.read(key).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_json_maps_parse_failure_to_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        let key = "other/metadata.json";
        store.write(key, b"not json at all").await.unwrap();

        let parsed: Option<serde_json::Value> = read_json(&store, key).await;
        assert!(parsed.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_nested_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::with_root(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        store
            .write("player-service-record/a.json", b"{}")
            .await
            .unwrap();
        store.write("other/metadata.json", b"{}").await.unwrap();

        store.clear().await.unwrap();

        assert!(store.probe("player-service-record/a.json").await.is_none());
        assert!(store.probe("other/metadata.json").await.is_none());
    }
}
