//! Ephemeral share lifecycle: create, fetch, count.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use shortshare_core::config::ShareConfig;
use shortshare_core::error::{AppError, ErrorKind};
use shortshare_core::result::AppResult;
use shortshare_core::traits::BlobStore;
use shortshare_core::types::ShareId;
use shortshare_database::ShareStore;
use shortshare_entity::share::{
    Attachment, NewAttachment, NewShare, Share, ShareType, normalize_language,
};

use super::stats::ShareStats;
use super::upload::FileUpload;
use crate::expiry::{Clock, Countdown, ExpiryPolicy, Remaining, SystemClock};

/// Message shown for both missing and expired shares.
pub const NOT_FOUND_MESSAGE: &str = "Share not found or expired.";

/// Creates and serves ephemeral shares.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Relational store for share and attachment rows.
    store: Arc<dyn ShareStore>,
    /// Object store for attachment payloads.
    blobs: Arc<dyn BlobStore>,
    /// Fixed TTL.
    policy: ExpiryPolicy,
    /// Time source for expiry checks.
    clock: Arc<dyn Clock>,
    /// Aggregate size limit per files share.
    max_total_upload_bytes: u64,
    /// Reject expired shares on read.
    enforce_expiry_on_read: bool,
}

impl ShareService {
    /// Creates a new share service on the system clock.
    pub fn new(store: Arc<dyn ShareStore>, blobs: Arc<dyn BlobStore>, config: &ShareConfig) -> Self {
        Self {
            store,
            blobs,
            policy: ExpiryPolicy::from_config(config),
            clock: Arc::new(SystemClock),
            max_total_upload_bytes: config.max_total_upload_bytes,
            enforce_expiry_on_read: config.enforce_expiry_on_read,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The expiry policy in force.
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// The time source in use.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Creates a text or code share and returns its identifier.
    ///
    /// `content` is stored verbatim but must not be blank. For code shares
    /// the language is lowercased, with "Plain Text" (or nothing) stored as
    /// no language; plain text shares never carry one.
    pub async fn create_text_share(
        &self,
        content: &str,
        is_code: bool,
        language: Option<&str>,
    ) -> AppResult<ShareId> {
        if content.trim().is_empty() {
            return Err(AppError::validation(
                "Please enter some text or code to share.",
            ));
        }

        let (kind, language) = if is_code {
            (ShareType::Code, normalize_language(language))
        } else {
            (ShareType::Text, None)
        };

        let share_id = ShareId::new();
        self.store
            .insert_share(&NewShare {
                share_id,
                kind,
                content: Some(content.to_string()),
                language,
                ttl_seconds: self.policy.ttl_seconds(),
            })
            .await
            .map_err(AppError::into_storage)?;

        info!(share_id = %share_id, kind = %kind, bytes = content.len(), "Share created");
        Ok(share_id)
    }

    /// Creates a files share and returns its identifier.
    ///
    /// All checks run before anything is written. Files are then uploaded
    /// one at a time, each followed by its attachment row; the first failure
    /// stops the sequence and leaves what was already written in place.
    pub async fn create_file_share(&self, files: Vec<FileUpload>) -> AppResult<ShareId> {
        self.validate_files(&files)?;

        let share_id = ShareId::new();
        let row = self
            .store
            .insert_share(&NewShare {
                share_id,
                kind: ShareType::Files,
                content: None,
                language: None,
                ttl_seconds: self.policy.ttl_seconds(),
            })
            .await
            .map_err(AppError::into_storage)?;

        let count = files.len();
        for file in files {
            let storage_path = NewAttachment::storage_path_for(&share_id, &file.name);
            let size = file.size();

            self.blobs
                .upload(&storage_path, file.data, file.mime_type.as_deref())
                .await
                .map_err(|e| {
                    warn!(share_id = %share_id, key = %storage_path, error = %e, "Attachment upload failed");
                    e.into_storage()
                })?;

            self.store
                .insert_attachment(&NewAttachment {
                    share_id: row.id,
                    name: file.name,
                    size: i64::try_from(size).unwrap_or(i64::MAX),
                    mime_type: file.mime_type,
                    storage_path,
                })
                .await
                .map_err(|e| {
                    warn!(share_id = %share_id, error = %e, "Attachment row insert failed");
                    e.into_storage()
                })?;
        }

        info!(share_id = %share_id, files = count, "Files share created");
        Ok(share_id)
    }

    fn validate_files(&self, files: &[FileUpload]) -> AppResult<()> {
        if files.is_empty() {
            return Err(AppError::validation("Please select files to share."));
        }

        let total: u64 = files.iter().map(FileUpload::size).sum();
        if total > self.max_total_upload_bytes {
            return Err(AppError::validation(format!(
                "Total file size exceeds {} MB limit.",
                self.max_total_upload_bytes / (1024 * 1024)
            )));
        }

        let mut seen = HashSet::with_capacity(files.len());
        for file in files {
            let name = file.name.as_str();
            if name.trim().is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
                return Err(AppError::validation(format!("Invalid file name: {name:?}")));
            }
            if !seen.insert(name) {
                return Err(AppError::validation(format!("Duplicate file name: {name}")));
            }
        }
        Ok(())
    }

    /// Fetches a share by its external identifier.
    ///
    /// Missing shares, and expired ones unless expiry is not enforced on
    /// read, fail with the same `NotFound` error.
    pub async fn get_share(&self, share_id: &ShareId) -> AppResult<Share> {
        let row = self
            .store
            .find_by_share_id(share_id)
            .await
            .map_err(AppError::into_storage)?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

        if self.enforce_expiry_on_read && ExpiryPolicy::is_expired(row.expires_at, self.clock.now())
        {
            debug!(share_id = %share_id, expires_at = %row.expires_at, "Share expired");
            return Err(AppError::not_found(NOT_FOUND_MESSAGE));
        }

        let attachments = match row.kind {
            ShareType::Files => self.get_attachments(row.id).await?,
            ShareType::Text | ShareType::Code => Vec::new(),
        };
        Share::from_row(row, attachments)
    }

    /// Attachments of a share, ordered by insertion.
    pub async fn get_attachments(&self, share_internal_id: i64) -> AppResult<Vec<Attachment>> {
        self.store
            .list_attachments(share_internal_id)
            .await
            .map_err(AppError::into_storage)
    }

    /// Adds one view to a share.
    pub async fn increment_view_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.store
            .increment_view_count(share_internal_id)
            .await
            .map_err(keep_not_found)
    }

    /// Adds one download to a share.
    pub async fn increment_download_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.store
            .increment_download_count(share_internal_id)
            .await
            .map_err(keep_not_found)
    }

    /// Counts a view of `share` if it has not expired. Returns whether it
    /// was counted.
    pub async fn record_view(&self, share: &Share) -> AppResult<bool> {
        if share.is_expired_at(self.clock.now()) {
            return Ok(false);
        }
        self.increment_view_count(share.id).await?;
        Ok(true)
    }

    /// Counts a download of `share` if it has not expired. Returns whether it
    /// was counted.
    pub async fn record_download(&self, share: &Share) -> AppResult<bool> {
        if share.is_expired_at(self.clock.now()) {
            return Ok(false);
        }
        self.increment_download_count(share.id).await?;
        Ok(true)
    }

    /// Public URL an attachment is downloaded from.
    pub fn download_url(&self, attachment: &Attachment) -> String {
        self.blobs.public_url(&attachment.storage_path)
    }

    /// Reads an attachment's bytes and counts the download.
    pub async fn download(&self, share: &Share, attachment: &Attachment) -> AppResult<Bytes> {
        if attachment.share_id != share.id {
            return Err(AppError::not_found(format!(
                "Attachment {} does not belong to share {}",
                attachment.name, share.share_id
            )));
        }
        let data = self
            .blobs
            .read_bytes(&attachment.storage_path)
            .await
            .map_err(keep_not_found)?;
        self.record_download(share).await?;
        Ok(data)
    }

    /// Time left on `share` right now.
    pub fn remaining(&self, share: &Share) -> Remaining {
        ExpiryPolicy::remaining(share.expires_at, self.clock.now())
    }

    /// Start a once-per-second countdown for `share`.
    pub fn countdown(&self, share: &Share) -> Countdown {
        Countdown::start(share.expires_at, self.clock())
    }

    /// Statistics for `share` with `viewers` live viewers.
    pub fn stats(&self, share: &Share, viewers: usize) -> ShareStats {
        ShareStats::collect(share, viewers, self.clock.now())
    }
}

fn keep_not_found(err: AppError) -> AppError {
    if err.is(ErrorKind::NotFound) {
        err
    } else {
        err.into_storage()
    }
}
