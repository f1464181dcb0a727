//! Wires the configured backends into the services commands use.

use std::sync::Arc;

use tracing::info;

use shortshare_core::config::AppConfig;
use shortshare_core::error::AppError;
use shortshare_core::traits::PresenceTransport;
use shortshare_database::connection::mask_password;
use shortshare_database::migration::run_migrations;
use shortshare_database::{DatabasePool, MemoryShareStore, PgShareStore, ShareStore};
use shortshare_realtime::{MemoryPresenceHub, PresenceTracker};
use shortshare_service::{LinkService, ShareService};
use shortshare_storage::build_blob_store;

/// Services shared by all commands.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Share lifecycle service.
    pub shares: ShareService,
    /// Link builder/parser.
    pub links: LinkService,
    /// Viewer presence.
    pub presence: PresenceTracker,
}

impl AppContext {
    /// Build the context from configuration, connecting to PostgreSQL when
    /// `database.backend = "postgres"`.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn ShareStore> = match config.database.backend.as_str() {
            "memory" => Arc::new(MemoryShareStore::new()),
            "postgres" => {
                info!(url = %mask_password(&config.database.url), "Using PostgreSQL share store");
                let pool = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Arc::new(PgShareStore::new(pool.into_pool()))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown database backend: {other}"
                )));
            }
        };

        let blobs = build_blob_store(&config.storage).await?;
        let transport: Arc<dyn PresenceTransport> =
            Arc::new(MemoryPresenceHub::new(config.realtime.channel_buffer_size));

        info!(
            database = store.backend_type(),
            storage = blobs.provider_type(),
            "Backends initialized"
        );

        Ok(Self {
            shares: ShareService::new(store, blobs, &config.share),
            links: LinkService::from_config(&config.share),
            presence: PresenceTracker::new(transport, &config.realtime),
            config,
        })
    }

    /// Whether shares created in this process vanish when it exits.
    pub fn is_ephemeral(&self) -> bool {
        self.config.database.backend == "memory" || self.config.storage.provider == "memory"
    }
}
