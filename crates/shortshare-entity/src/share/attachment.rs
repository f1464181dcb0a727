//! Attachment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortshare_core::types::ShareId;

use super::file_kind::FileKind;

/// A row of the `share_files` table: one uploaded file of a files share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Surrogate key of the parent share (`shares.id`).
    pub share_id: i64,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type reported at upload.
    pub mime_type: Option<String>,
    /// Blob store key, `{share_id}/{name}`.
    pub storage_path: String,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Size in bytes, clamped to zero.
    pub fn size_bytes(&self) -> u64 {
        self.size.max(0) as u64
    }

    /// Display classification of the file.
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.name)
    }
}

/// Data required to insert an attachment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttachment {
    /// Surrogate key of the parent share.
    pub share_id: i64,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Blob store key.
    pub storage_path: String,
}

impl NewAttachment {
    /// Blob store key for `name` inside the share identified by `share_id`.
    pub fn storage_path_for(share_id: &ShareId, name: &str) -> String {
        format!("{share_id}/{name}")
    }
}
