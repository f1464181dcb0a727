//! In-memory presence topics for single-node deployments.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use shortshare_core::result::AppResult;
use shortshare_core::traits::presence::{PresenceSnapshot, PresenceTransport};

/// One presence topic: its members and the channel announcing changes.
#[derive(Debug)]
struct Topic {
    members: BTreeSet<String>,
    tx: broadcast::Sender<PresenceSnapshot>,
}

impl Topic {
    fn snapshot(&self, name: &str) -> PresenceSnapshot {
        PresenceSnapshot {
            topic: name.to_string(),
            members: self.members.clone(),
        }
    }
}

/// In-memory presence topic service.
///
/// Every `track`/`untrack` that changes membership broadcasts a fresh
/// snapshot to all subscribers of the topic. Topics with no members and no
/// subscribers are dropped.
#[derive(Debug)]
pub struct MemoryPresenceHub {
    /// Topic name → topic state
    topics: RwLock<HashMap<String, Topic>>,
    /// Buffer size for each topic's channel
    buffer_size: usize,
}

impl MemoryPresenceHub {
    /// Create a new hub whose topic channels buffer `buffer_size` snapshots.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Number of live topics.
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }

    fn new_topic(&self) -> Topic {
        Topic {
            members: BTreeSet::new(),
            tx: broadcast::channel(self.buffer_size).0,
        }
    }
}

#[async_trait]
impl PresenceTransport for MemoryPresenceHub {
    async fn subscribe(&self, topic: &str) -> AppResult<broadcast::Receiver<PresenceSnapshot>> {
        let mut topics = self.topics.write().await;
        let entry = topics
            .entry(topic.to_string())
            .or_insert_with(|| self.new_topic());
        debug!(topic, subscribers = entry.tx.receiver_count() + 1, "Presence subscribe");
        Ok(entry.tx.subscribe())
    }

    async fn track(&self, topic: &str, key: &str) -> AppResult<()> {
        let mut topics = self.topics.write().await;
        let entry = topics
            .entry(topic.to_string())
            .or_insert_with(|| self.new_topic());
        if entry.members.insert(key.to_string()) {
            debug!(topic, key, members = entry.members.len(), "Presence track");
            let _ = entry.tx.send(entry.snapshot(topic));
        }
        Ok(())
    }

    async fn untrack(&self, topic: &str, key: &str) -> AppResult<()> {
        let mut topics = self.topics.write().await;
        let Some(entry) = topics.get_mut(topic) else {
            return Ok(());
        };
        if entry.members.remove(key) {
            debug!(topic, key, members = entry.members.len(), "Presence untrack");
            let _ = entry.tx.send(entry.snapshot(topic));
        }
        if entry.members.is_empty() && entry.tx.receiver_count() == 0 {
            topics.remove(topic);
        }
        Ok(())
    }

    async fn snapshot(&self, topic: &str) -> AppResult<PresenceSnapshot> {
        let topics = self.topics.read().await;
        Ok(topics
            .get(topic)
            .map(|t| t.snapshot(topic))
            .unwrap_or_else(|| PresenceSnapshot {
                topic: topic.to_string(),
                members: BTreeSet::new(),
            }))
    }
}
