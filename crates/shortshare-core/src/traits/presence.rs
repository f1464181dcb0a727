//! Presence transport trait: the realtime topic service seen from a client.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::result::AppResult;

/// Membership of a presence topic at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// Topic name.
    pub topic: String,
    /// Distinct member keys currently tracked on the topic.
    pub members: BTreeSet<String>,
}

impl PresenceSnapshot {
    /// Number of distinct members.
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// A named-topic presence service.
///
/// `subscribe` confirms the subscription by returning a receiver that gets a
/// fresh [`PresenceSnapshot`] after every membership change on the topic.
#[async_trait]
pub trait PresenceTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Subscribe to membership changes on `topic`.
    async fn subscribe(&self, topic: &str) -> AppResult<broadcast::Receiver<PresenceSnapshot>>;

    /// Announce `key` as present on `topic`.
    async fn track(&self, topic: &str, key: &str) -> AppResult<()>;

    /// Withdraw `key` from `topic`. Untracking an absent key is a no-op.
    async fn untrack(&self, topic: &str, key: &str) -> AppResult<()>;

    /// Current membership of `topic`.
    async fn snapshot(&self, topic: &str) -> AppResult<PresenceSnapshot>;
}
