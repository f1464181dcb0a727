//! Presence record value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shortshare_core::types::PresenceToken;

/// One viewing session announced on a share's presence topic.
///
/// Never persisted; it lives exactly as long as the session that tracks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    /// Topic the session is tracked on.
    pub topic: String,
    /// Random per-connection token used as the member key.
    pub token: PresenceToken,
    /// When the session started tracking.
    pub joined_at: DateTime<Utc>,
}

impl PresenceRecord {
    /// Create a record with a freshly generated token.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            token: PresenceToken::new(),
            joined_at: Utc::now(),
        }
    }

    /// Member key used on the topic.
    pub fn key(&self) -> String {
        self.token.to_string()
    }
}
