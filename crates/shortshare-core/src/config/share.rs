//! Share lifecycle policy.

use serde::{Deserialize, Serialize};

/// Fixed time-to-live of every share, in seconds (2 hours).
pub const DEFAULT_TTL_SECONDS: u64 = 2 * 60 * 60;

/// Longest lifetime a deployment may configure, in seconds (365 days).
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Aggregate upload limit per share, in bytes (50 MiB).
pub const DEFAULT_MAX_TOTAL_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Policy constants for share creation and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Time from creation to expiry, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum summed size of all files in one share.
    #[serde(default = "default_max_total_upload")]
    pub max_total_upload_bytes: u64,
    /// Origin used to build share links (`<origin>/share/<share_id>`).
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
    /// Treat shares past `expires_at` as not found when fetched.
    #[serde(default = "default_true")]
    pub enforce_expiry_on_read: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_total_upload_bytes: default_max_total_upload(),
            public_origin: default_public_origin(),
            enforce_expiry_on_read: true,
        }
    }
}

fn default_ttl() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_max_total_upload() -> u64 {
    DEFAULT_MAX_TOTAL_UPLOAD_BYTES
}

fn default_public_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_true() -> bool {
    true
}
