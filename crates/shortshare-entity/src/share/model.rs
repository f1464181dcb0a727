//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortshare_core::error::AppError;
use shortshare_core::types::ShareId;

use super::attachment::Attachment;

/// Kind of content a share carries. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    /// One or more uploaded files.
    Files,
    /// Plain text.
    Text,
    /// Source code with an optional language label.
    Code,
}

impl ShareType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Text => "text",
            Self::Code => "code",
        }
    }
}

impl std::fmt::Display for ShareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row of the `shares` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareRow {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// External identifier used in links.
    pub share_id: ShareId,
    /// Content kind.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ShareType,
    /// Text or code body; `None` for files.
    pub content: Option<String>,
    /// Lowercase language label; only for code.
    pub language: Option<String>,
    /// Set by the store on insert.
    pub created_at: DateTime<Utc>,
    /// `created_at + TTL`.
    pub expires_at: DateTime<Utc>,
    /// Number of recorded views.
    pub view_count: i64,
    /// Number of recorded downloads.
    pub download_count: i64,
}

/// Data required to insert a share row.
///
/// `created_at` and `expires_at` are assigned by the store from a single
/// clock reading so that `expires_at - created_at` is exactly the TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShare {
    /// Identifier generated by the creator before the write.
    pub share_id: ShareId,
    /// Content kind.
    pub kind: ShareType,
    /// Body for text/code shares.
    pub content: Option<String>,
    /// Normalized language label for code shares.
    pub language: Option<String>,
    /// Time-to-live in seconds.
    pub ttl_seconds: i64,
}

/// Share content as a tagged variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShareContent {
    /// Uploaded files, ordered by insertion.
    Files {
        /// Attachment rows of the share.
        attachments: Vec<Attachment>,
    },
    /// Plain text.
    Text {
        /// The text, exactly as submitted.
        content: String,
    },
    /// Source code.
    Code {
        /// The code, exactly as submitted.
        content: String,
        /// Lowercase language label, `None` for plain text.
        language: Option<String>,
    },
}

impl ShareContent {
    /// The kind tag of this content.
    pub fn kind(&self) -> ShareType {
        match self {
            Self::Files { .. } => ShareType::Files,
            Self::Text { .. } => ShareType::Text,
            Self::Code { .. } => ShareType::Code,
        }
    }
}

/// A share as consumers see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// External identifier used in links.
    pub share_id: ShareId,
    /// The shared content.
    pub content: ShareContent,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Recorded views.
    pub view_count: u64,
    /// Recorded downloads.
    pub download_count: u64,
}

impl Share {
    /// Build a share from its row and, for files shares, its attachments.
    ///
    /// Fails if a text or code row has no content, or if attachments are
    /// supplied for a non-files share.
    pub fn from_row(row: ShareRow, attachments: Vec<Attachment>) -> Result<Self, AppError> {
        let content = match row.kind {
            ShareType::Files => ShareContent::Files { attachments },
            ShareType::Text | ShareType::Code if !attachments.is_empty() => {
                return Err(AppError::internal(format!(
                    "Share {} of type {} has attachments",
                    row.share_id, row.kind
                )));
            }
            ShareType::Text => ShareContent::Text {
                content: row.content.ok_or_else(|| missing_content(&row.share_id))?,
            },
            ShareType::Code => ShareContent::Code {
                content: row.content.ok_or_else(|| missing_content(&row.share_id))?,
                language: row.language,
            },
        };

        Ok(Self {
            id: row.id,
            share_id: row.share_id,
            content,
            created_at: row.created_at,
            expires_at: row.expires_at,
            view_count: row.view_count.max(0) as u64,
            download_count: row.download_count.max(0) as u64,
        })
    }

    /// The kind tag of this share.
    pub fn kind(&self) -> ShareType {
        self.content.kind()
    }

    /// Whether the share is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Attachments of a files share; empty for text and code.
    pub fn attachments(&self) -> &[Attachment] {
        match &self.content {
            ShareContent::Files { attachments } => attachments,
            ShareContent::Text { .. } | ShareContent::Code { .. } => &[],
        }
    }

    /// Summed size of all attachments in bytes.
    pub fn total_size(&self) -> u64 {
        self.attachments().iter().map(Attachment::size_bytes).sum()
    }
}

fn missing_content(share_id: &ShareId) -> AppError {
    AppError::internal(format!("Share {share_id} has no content"))
}

/// Character and word counts of a text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Number of Unicode scalar values.
    pub characters: usize,
    /// Number of whitespace-separated words.
    pub words: usize,
}

impl TextStats {
    /// Count characters and words in `text`.
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}
