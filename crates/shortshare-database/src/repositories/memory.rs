//! In-memory share store for single-node deployments and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use shortshare_core::error::AppError;
use shortshare_core::result::AppResult;
use shortshare_core::types::ShareId;
use shortshare_entity::share::{Attachment, NewAttachment, NewShare, ShareRow};

use crate::store::ShareStore;

/// Share store keeping rows in concurrent maps.
///
/// Mirrors the PostgreSQL schema: surrogate keys come from sequences,
/// `share_id` and `storage_path` are unique, and attachments must reference
/// an existing share.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareStore {
    /// Surrogate id → share row.
    shares: Arc<DashMap<i64, ShareRow>>,
    /// External id → surrogate id.
    by_share_id: Arc<DashMap<ShareId, i64>>,
    /// Parent surrogate id → attachments in insertion order.
    attachments: Arc<DashMap<i64, Vec<Attachment>>>,
    /// Storage path uniqueness index.
    storage_paths: Arc<DashMap<String, i64>>,
    share_seq: Arc<AtomicI64>,
    attachment_seq: Arc<AtomicI64>,
}

impl MemoryShareStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of share rows.
    pub fn share_count(&self) -> usize {
        self.shares.len()
    }

    /// Number of attachment rows across all shares.
    pub fn attachment_count(&self) -> usize {
        self.attachments.iter().map(|e| e.value().len()).sum()
    }

    fn next_id(seq: &AtomicI64) -> i64 {
        seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn bump(&self, share_internal_id: i64, field: fn(&mut ShareRow) -> &mut i64) -> AppResult<()> {
        let mut row = self
            .shares
            .get_mut(&share_internal_id)
            .ok_or_else(|| AppError::not_found(format!("Share {share_internal_id} not found")))?;
        *field(row.value_mut()) += 1;
        Ok(())
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn insert_share(&self, data: &NewShare) -> AppResult<ShareRow> {
        let created_at = Utc::now();
        let expires_at = Duration::try_seconds(data.ttl_seconds)
            .and_then(|ttl| created_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Share lifetime of {}s is out of range",
                    data.ttl_seconds
                ))
            })?;

        let id = match self.by_share_id.entry(data.share_id) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Share {} already exists",
                    data.share_id
                )));
            }
            Entry::Vacant(slot) => {
                let id = Self::next_id(&self.share_seq);
                slot.insert(id);
                id
            }
        };

        let row = ShareRow {
            id,
            share_id: data.share_id,
            kind: data.kind,
            content: data.content.clone(),
            language: data.language.clone(),
            created_at,
            expires_at,
            view_count: 0,
            download_count: 0,
        };
        self.shares.insert(id, row.clone());

        debug!(id, share_id = %data.share_id, "Inserted share row");
        Ok(row)
    }

    async fn find_by_share_id(&self, share_id: &ShareId) -> AppResult<Option<ShareRow>> {
        let Some(id) = self.by_share_id.get(share_id).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self.shares.get(&id).map(|r| r.value().clone()))
    }

    async fn insert_attachment(&self, data: &NewAttachment) -> AppResult<Attachment> {
        if !self.shares.contains_key(&data.share_id) {
            return Err(AppError::database(format!(
                "Attachment references missing share {}",
                data.share_id
            )));
        }
        if data.size < 0 {
            return Err(AppError::database("Attachment size must be non-negative"));
        }

        let id = match self.storage_paths.entry(data.storage_path.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Attachment path {} already exists",
                    data.storage_path
                )));
            }
            Entry::Vacant(slot) => {
                let id = Self::next_id(&self.attachment_seq);
                slot.insert(id);
                id
            }
        };

        let attachment = Attachment {
            id,
            share_id: data.share_id,
            name: data.name.clone(),
            size: data.size,
            mime_type: data.mime_type.clone(),
            storage_path: data.storage_path.clone(),
            created_at: Utc::now(),
        };
        self.attachments
            .entry(data.share_id)
            .or_default()
            .push(attachment.clone());

        debug!(id, share = data.share_id, name = %data.name, "Inserted attachment row");
        Ok(attachment)
    }

    async fn list_attachments(&self, share_internal_id: i64) -> AppResult<Vec<Attachment>> {
        Ok(self
            .attachments
            .get(&share_internal_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    async fn increment_view_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.bump(share_internal_id, |row| &mut row.view_count)
    }

    async fn increment_download_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.bump(share_internal_id, |row| &mut row.download_count)
    }
}

#[cfg(test)]
mod tests {
    use shortshare_core::error::ErrorKind;
    use shortshare_entity::share::ShareType;

    use super::*;

    fn new_text(share_id: ShareId) -> NewShare {
        NewShare {
            share_id,
            kind: ShareType::Text,
            content: Some("hello".to_string()),
            language: None,
            ttl_seconds: 7200,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_expiry() {
        let store = MemoryShareStore::new();
        let first = store.insert_share(&new_text(ShareId::new())).await.unwrap();
        let second = store.insert_share(&new_text(ShareId::new())).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.expires_at - first.created_at, Duration::hours(2));
        assert_eq!(first.view_count, 0);
        assert_eq!(first.download_count, 0);
    }

    #[tokio::test]
    async fn test_duplicate_share_id_conflicts() {
        let store = MemoryShareStore::new();
        let share_id = ShareId::new();
        store.insert_share(&new_text(share_id)).await.unwrap();

        let err = store.insert_share(&new_text(share_id)).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(store.share_count(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_rejected() {
        let store = MemoryShareStore::new();
        let mut data = new_text(ShareId::new());
        data.ttl_seconds = i64::MAX;

        let err = store.insert_share(&data).await.unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
        assert_eq!(store.share_count(), 0);
    }

    #[tokio::test]
    async fn test_attachment_requires_parent() {
        let store = MemoryShareStore::new();
        let err = store
            .insert_attachment(&NewAttachment {
                share_id: 42,
                name: "a.txt".to_string(),
                size: 1,
                mime_type: None,
                storage_path: "x/a.txt".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Database));
    }

    #[tokio::test]
    async fn test_attachments_listed_in_insertion_order() {
        let store = MemoryShareStore::new();
        let share_id = ShareId::new();
        let row = store
            .insert_share(&NewShare {
                share_id,
                kind: ShareType::Files,
                content: None,
                language: None,
                ttl_seconds: 7200,
            })
            .await
            .unwrap();

        for name in ["b.txt", "a.txt"] {
            store
                .insert_attachment(&NewAttachment {
                    share_id: row.id,
                    name: name.to_string(),
                    size: 3,
                    mime_type: Some("text/plain".to_string()),
                    storage_path: NewAttachment::storage_path_for(&share_id, name),
                })
                .await
                .unwrap();
        }

        let names: Vec<_> = store
            .list_attachments(row.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
        assert!(store.list_attachments(row.id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counters_increment() {
        let store = MemoryShareStore::new();
        let share_id = ShareId::new();
        let row = store.insert_share(&new_text(share_id)).await.unwrap();

        store.increment_view_count(row.id).await.unwrap();
        store.increment_view_count(row.id).await.unwrap();
        store.increment_download_count(row.id).await.unwrap();

        let row = store.find_by_share_id(&share_id).await.unwrap().unwrap();
        assert_eq!(row.view_count, 2);
        assert_eq!(row.download_count, 1);
        assert!(store.increment_view_count(999).await.is_err());
    }
}
