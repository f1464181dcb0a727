//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use shortshare_core::error::{AppError, ErrorKind};
use shortshare_core::result::AppResult;
use shortshare_core::traits::blob::BlobStore;

use crate::url::{public_url, validate_key};

/// Blob store writing each key to a file below a root directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
    /// Base URL the root directory is served under.
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a new local blob store rooted at the given path.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.to_string(),
        })
    }

    /// Resolve a key to an absolute path within the root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::with_source(
                        ErrorKind::Conflict,
                        format!("The resource already exists: {key}"),
                        e,
                    )
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create blob: {key}"),
                        e,
                    )
                }
            })?;

        file.write_all(&data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write blob: {key}"), e)
        })?;
        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush blob", e))?;

        debug!(key, bytes = data.len(), content_type, "Stored blob");
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(key)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read blob: {key}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        Ok(fs::try_exists(&full_path).await.unwrap_or(false))
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(dir: &tempfile::TempDir) -> LocalBlobStore {
        LocalBlobStore::new(dir.path().to_str().unwrap(), "http://files.test/share-files")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let data = Bytes::from("hello blob");
        store
            .upload("abc/a.txt", data.clone(), Some("text/plain"))
            .await
            .unwrap();

        assert!(store.exists("abc/a.txt").await.unwrap());
        assert_eq!(store.read_bytes("abc/a.txt").await.unwrap(), data);
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .upload("abc/a.txt", Bytes::from("first"), None)
            .await
            .unwrap();
        let err = store
            .upload("abc/a.txt", Bytes::from("second"), None)
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(
            store.read_bytes("abc/a.txt").await.unwrap(),
            Bytes::from("first")
        );
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let err = store.read_bytes("abc/missing.txt").await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert!(!store.exists("abc/missing.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let err = store
            .upload("../escape.txt", Bytes::from("x"), None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        assert_eq!(
            store.public_url("abc/a.txt"),
            "http://files.test/share-files/abc/a.txt"
        );
    }
}
