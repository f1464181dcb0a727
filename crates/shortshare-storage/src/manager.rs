//! Blob store selection from configuration.

use std::sync::Arc;

use tracing::info;

use shortshare_core::config::StorageConfig;
use shortshare_core::error::AppError;
use shortshare_core::result::AppResult;
use shortshare_core::traits::blob::BlobStore;

use crate::providers::MemoryBlobStore;

/// Build the blob store named by `config.provider`.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider.as_str() {
        #[cfg(feature = "local")]
        "local" => Arc::new(
            crate::providers::LocalBlobStore::new(
                &config.local.root_path,
                &config.public_base_url,
            )
            .await?,
        ),
        "memory" => Arc::new(MemoryBlobStore::new(&config.public_base_url)),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider: '{other}'"
            )));
        }
    };

    info!(provider = store.provider_type(), "Blob store initialized");
    Ok(store)
}
