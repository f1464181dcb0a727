//! The relational store surface used by the share service.

use async_trait::async_trait;

use shortshare_core::result::AppResult;
use shortshare_core::types::ShareId;
use shortshare_entity::share::{Attachment, NewAttachment, NewShare, ShareRow};

/// Insert/select/update access to the `shares` and `share_files` tables.
///
/// Counter increments only promise that a counter never decreases; callers
/// must not rely on exact totals under concurrent viewers.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "postgres", "memory").
    fn backend_type(&self) -> &str;

    /// Insert a share row and return it as stored.
    ///
    /// Fails with `Conflict` if `share_id` is already taken.
    async fn insert_share(&self, data: &NewShare) -> AppResult<ShareRow>;

    /// Find a share row by its external identifier.
    async fn find_by_share_id(&self, share_id: &ShareId) -> AppResult<Option<ShareRow>>;

    /// Insert an attachment row referencing `data.share_id`.
    async fn insert_attachment(&self, data: &NewAttachment) -> AppResult<Attachment>;

    /// All attachments of a share, ordered by insertion.
    async fn list_attachments(&self, share_internal_id: i64) -> AppResult<Vec<Attachment>>;

    /// Add one to the share's view counter.
    async fn increment_view_count(&self, share_internal_id: i64) -> AppResult<()>;

    /// Add one to the share's download counter.
    async fn increment_download_count(&self, share_internal_id: i64) -> AppResult<()>;
}
