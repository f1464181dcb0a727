//! PostgreSQL share store.

use async_trait::async_trait;
use sqlx::PgPool;

use shortshare_core::error::{AppError, ErrorKind};
use shortshare_core::result::AppResult;
use shortshare_core::types::ShareId;
use shortshare_entity::share::{Attachment, NewAttachment, NewShare, ShareRow};

use crate::store::ShareStore;

const SHARE_COLUMNS: &str =
    "id, share_id, type, content, language, created_at, expires_at, view_count, download_count";

const ATTACHMENT_COLUMNS: &str = "id, share_id, name, size, mime_type, storage_path, created_at";

/// Share store backed by the `shares` and `share_files` tables.
#[derive(Debug, Clone)]
pub struct PgShareStore {
    pool: PgPool,
}

impl PgShareStore {
    /// Create a new PostgreSQL share store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn increment(&self, column: &str, share_internal_id: i64) -> AppResult<()> {
        let sql = format!("UPDATE shares SET {column} = {column} + 1 WHERE id = $1");
        let result = sqlx::query(&sql)
            .bind(share_internal_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to increment {column}"),
                    e,
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Share {share_internal_id} not found"
            )));
        }
        Ok(())
    }
}

/// Whether a sqlx error is a unique-constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

#[async_trait]
impl ShareStore for PgShareStore {
    fn backend_type(&self) -> &str {
        "postgres"
    }

    async fn insert_share(&self, data: &NewShare) -> AppResult<ShareRow> {
        let sql = format!(
            "INSERT INTO shares (share_id, type, content, language, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW() + ($5::BIGINT * INTERVAL '1 second')) \
             RETURNING {SHARE_COLUMNS}"
        );
        sqlx::query_as::<_, ShareRow>(&sql)
            .bind(data.share_id)
            .bind(data.kind)
            .bind(&data.content)
            .bind(&data.language)
            .bind(data.ttl_seconds)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::with_source(
                        ErrorKind::Conflict,
                        format!("Share {} already exists", data.share_id),
                        e,
                    )
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to create share", e)
                }
            })
    }

    async fn find_by_share_id(&self, share_id: &ShareId) -> AppResult<Option<ShareRow>> {
        let sql = format!("SELECT {SHARE_COLUMNS} FROM shares WHERE share_id = $1");
        sqlx::query_as::<_, ShareRow>(&sql)
            .bind(*share_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    async fn insert_attachment(&self, data: &NewAttachment) -> AppResult<Attachment> {
        let sql = format!(
            "INSERT INTO share_files (share_id, name, size, mime_type, storage_path) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {ATTACHMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&sql)
            .bind(data.share_id)
            .bind(&data.name)
            .bind(data.size)
            .bind(&data.mime_type)
            .bind(&data.storage_path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create attachment", e)
            })
    }

    async fn list_attachments(&self, share_internal_id: i64) -> AppResult<Vec<Attachment>> {
        let sql =
            format!("SELECT {ATTACHMENT_COLUMNS} FROM share_files WHERE share_id = $1 ORDER BY id");
        sqlx::query_as::<_, Attachment>(&sql)
            .bind(share_internal_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list attachments", e)
            })
    }

    async fn increment_view_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.increment("view_count", share_internal_id).await
    }

    async fn increment_download_count(&self, share_internal_id: i64) -> AppResult<()> {
        self.increment("download_count", share_internal_id).await
    }
}
