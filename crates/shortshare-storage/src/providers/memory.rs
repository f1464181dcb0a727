//! In-memory blob store for single-node deployments and tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use shortshare_core::error::AppError;
use shortshare_core::result::AppResult;
use shortshare_core::traits::blob::BlobStore;

use crate::url::{public_url, validate_key};

/// A stored blob and its declared content type.
#[derive(Debug, Clone)]
struct StoredBlob {
    data: Bytes,
    content_type: Option<String>,
}

/// Blob store holding payloads in a concurrent map.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<DashMap<String, StoredBlob>>,
    public_base_url: String,
}

impl MemoryBlobStore {
    /// Create an empty store serving blobs under `public_base_url`.
    pub fn new(public_base_url: &str) -> Self {
        Self {
            blobs: Arc::new(DashMap::new()),
            public_base_url: public_base_url.to_string(),
        }
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Content type recorded for `key`.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs.get(key).and_then(|b| b.content_type.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        validate_key(key)?;
        match self.blobs.entry(key.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "The resource already exists: {key}"
            ))),
            Entry::Vacant(slot) => {
                debug!(key, bytes = data.len(), content_type, "Stored blob");
                slot.insert(StoredBlob {
                    data,
                    content_type: content_type.map(str::to_string),
                });
                Ok(())
            }
        }
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .get(key)
            .map(|b| b.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(key))
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use shortshare_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_upload_is_write_once() {
        let store = MemoryBlobStore::new("http://files.test");
        store
            .upload("k/a.txt", Bytes::from("one"), Some("text/plain"))
            .await
            .unwrap();

        let err = store
            .upload("k/a.txt", Bytes::from("two"), None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(store.read_bytes("k/a.txt").await.unwrap(), Bytes::from("one"));
        assert_eq!(store.content_type("k/a.txt").as_deref(), Some("text/plain"));
        assert_eq!(store.len(), 1);
    }
}
