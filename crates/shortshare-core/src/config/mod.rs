//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that an empty
//! configuration yields a runnable in-memory setup.

pub mod database;
pub mod logging;
pub mod realtime;
pub mod share;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;
pub use self::share::ShareConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Relational store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Share lifecycle policy (TTL, size limits, link origin).
    #[serde(default)]
    pub share: ShareConfig,
    /// Realtime presence settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, an optional environment-specific
    /// overlay `config/{env}.toml`, and environment variables prefixed with
    /// `SHORTSHARE__` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHORTSHARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the share lifecycle meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.share.ttl_seconds == 0 {
            return Err(AppError::configuration("share.ttl_seconds must be positive"));
        }
        if self.share.ttl_seconds > share::MAX_TTL_SECONDS {
            return Err(AppError::configuration(format!(
                "share.ttl_seconds must not exceed {}",
                share::MAX_TTL_SECONDS
            )));
        }
        if self.share.max_total_upload_bytes == 0 {
            return Err(AppError::configuration(
                "share.max_total_upload_bytes must be positive",
            ));
        }
        if self.realtime.channel_buffer_size == 0 {
            return Err(AppError::configuration(
                "realtime.channel_buffer_size must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_share_policy() {
        let config = AppConfig::default();
        assert_eq!(config.share.ttl_seconds, 7200);
        assert_eq!(config.share.max_total_upload_bytes, 50 * 1024 * 1024);
        assert!(config.share.enforce_expiry_on_read);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_deserializes() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("empty config");
        assert_eq!(config.storage.provider, "memory");
        assert_eq!(config.database.backend, "memory");
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.share.ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let mut config = AppConfig::default();
        config.share.ttl_seconds = share::MAX_TTL_SECONDS;
        assert!(config.validate().is_ok());

        config.share.ttl_seconds = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.is(crate::error::ErrorKind::Configuration));
    }
}
