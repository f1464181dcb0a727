//! Figures shown alongside a share.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shortshare_core::types::ShareId;
use shortshare_entity::share::{Share, ShareContent, ShareType, TextStats};

use crate::expiry::{ExpiryPolicy, Remaining};

/// Counters, sizes, and time left for one share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareStats {
    /// Public identifier of the share.
    pub share_id: ShareId,
    /// Text, code, or files.
    pub kind: ShareType,
    /// Times the share has been opened.
    pub view_count: u64,
    /// Times any of its attachments has been fetched.
    pub download_count: u64,
    /// Distinct viewers currently on the share, including the caller.
    pub viewers: usize,
    /// Number of attached files; zero for text and code.
    pub attachment_count: usize,
    /// Summed attachment size in bytes.
    pub total_size: u64,
    /// Character and word counts; only for text and code.
    pub text: Option<TextStats>,
    /// Instant after which the share is no longer served.
    pub expires_at: DateTime<Utc>,
    /// Time left until `expires_at`, as of collection.
    pub remaining: Remaining,
}

impl ShareStats {
    /// Collect statistics for `share` as of `now`.
    pub fn collect(share: &Share, viewers: usize, now: DateTime<Utc>) -> Self {
        let text = match &share.content {
            ShareContent::Files { .. } => None,
            ShareContent::Text { content } | ShareContent::Code { content, .. } => {
                Some(TextStats::of(content))
            }
        };

        Self {
            share_id: share.share_id,
            kind: share.kind(),
            view_count: share.view_count,
            download_count: share.download_count,
            viewers,
            attachment_count: share.attachments().len(),
            total_size: share.total_size(),
            text,
            expires_at: share.expires_at,
            remaining: ExpiryPolicy::remaining(share.expires_at, now),
        }
    }
}

/// Human-readable byte size (`512 B`, `1.5 KB`, `50.0 MB`).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use shortshare_entity::share::ShareRow;

    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(50 * 1024 * 1024), "50.0 MB");
    }

    #[test]
    fn test_text_share_stats() {
        let now = Utc::now();
        let share = Share::from_row(
            ShareRow {
                id: 1,
                share_id: ShareId::new(),
                kind: ShareType::Code,
                content: Some("fn main() {}".to_string()),
                language: Some("rust".to_string()),
                created_at: now,
                expires_at: now + Duration::hours(2),
                view_count: 4,
                download_count: 0,
            },
            Vec::new(),
        )
        .unwrap();

        let stats = ShareStats::collect(&share, 2, now);
        assert_eq!(stats.kind, ShareType::Code);
        assert_eq!(stats.view_count, 4);
        assert_eq!(stats.viewers, 2);
        assert_eq!(stats.attachment_count, 0);
        assert_eq!(
            stats.text,
            Some(TextStats {
                characters: 12,
                words: 3
            })
        );
        assert_eq!(stats.remaining.to_string(), "02:00:00");
    }
}
