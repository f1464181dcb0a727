//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;

use shortshare_core::config::AppConfig;
use shortshare_database::MemoryShareStore;
use shortshare_realtime::{MemoryPresenceHub, PresenceTracker};
use shortshare_service::{LinkService, ManualClock, ShareService};
use shortshare_storage::LocalBlobStore;

/// Test application context
pub struct TestApp {
    /// Share service under test
    pub shares: ShareService,
    /// Link builder
    pub links: LinkService,
    /// Presence tracker over an in-process hub
    pub presence: PresenceTracker,
    /// Direct access to stored rows
    pub store: Arc<MemoryShareStore>,
    /// Direct access to presence topics
    pub hub: Arc<MemoryPresenceHub>,
    /// Controls "now" for expiry
    pub clock: Arc<ManualClock>,
    /// Blob root; removed on drop
    pub blob_dir: TempDir,
}

impl TestApp {
    /// Create a new test application with a local blob store in a temp dir
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");

        let blobs = Arc::new(
            LocalBlobStore::new(
                blob_dir.path().to_str().expect("utf-8 temp path"),
                &config.storage.public_base_url,
            )
            .await
            .expect("Failed to init blob store"),
        );
        let store = Arc::new(MemoryShareStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let hub = Arc::new(MemoryPresenceHub::new(config.realtime.channel_buffer_size));

        Self {
            shares: ShareService::new(store.clone(), blobs, &config.share)
                .with_clock(clock.clone()),
            links: LinkService::from_config(&config.share),
            presence: PresenceTracker::new(hub.clone(), &config.realtime),
            store,
            hub,
            clock,
            blob_dir,
        }
    }
}
