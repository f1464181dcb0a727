//! Blob store trait for share attachment payloads.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Key-addressed object storage holding attachment payloads.
///
/// Keys follow the `{share_id}/{name}` convention. Uploads never overwrite:
/// writing to a key that already holds a blob fails with
/// [`ErrorKind::Conflict`](crate::error::ErrorKind::Conflict).
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key`, refusing to replace an existing blob.
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Read a blob into memory.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Check whether a blob exists at `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Resolve the public URL a recipient downloads `key` from.
    fn public_url(&self, key: &str) -> String;
}
