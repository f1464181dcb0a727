//! Presence tracker: joins viewers to a share's presence topic.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use shortshare_core::config::RealtimeConfig;
use shortshare_core::traits::presence::PresenceTransport;
use shortshare_core::types::ShareId;
use shortshare_entity::presence::PresenceRecord;

use super::session::{PresenceSession, PresenceState, forward_counts};

/// Hands out [`PresenceSession`]s for shares.
#[derive(Debug, Clone)]
pub struct PresenceTracker {
    transport: Arc<dyn PresenceTransport>,
    topic_prefix: String,
}

impl PresenceTracker {
    /// Create a tracker over `transport`.
    pub fn new(transport: Arc<dyn PresenceTransport>, config: &RealtimeConfig) -> Self {
        Self {
            transport,
            topic_prefix: config.topic_prefix.clone(),
        }
    }

    /// Topic name for a share.
    pub fn topic_for(&self, share_id: &ShareId) -> String {
        format!("{}{share_id}", self.topic_prefix)
    }

    /// Join the presence topic of `share_id`.
    ///
    /// Never fails. If the transport refuses the subscription or the track,
    /// the returned session is degraded: it stays `Disconnected` and reports
    /// a static count of 1.
    pub async fn join(&self, share_id: &ShareId) -> PresenceSession {
        let topic = self.topic_for(share_id);
        let (count_tx, count_rx) = watch::channel(1usize);
        let mut session = PresenceSession::new(topic.clone(), Arc::clone(&self.transport), count_rx);
        session.set_state(PresenceState::Joining);

        let rx = match self.transport.subscribe(&topic).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!(topic = %topic, error = %e, "Presence subscribe failed; showing 1 viewer");
                session.degrade();
                return session;
            }
        };

        let record = PresenceRecord::new(&topic);
        if let Err(e) = self.transport.track(&topic, &record.key()).await {
            warn!(topic = %topic, error = %e, "Presence track failed; showing 1 viewer");
            drop(rx);
            if let Err(e) = self.transport.untrack(&topic, &record.key()).await {
                debug!(topic = %topic, error = %e, "Presence cleanup after failed track failed");
            }
            session.degrade();
            return session;
        }

        match self.transport.snapshot(&topic).await {
            Ok(snapshot) => {
                count_tx.send_replace(snapshot.count().max(1));
            }
            Err(e) => debug!(topic = %topic, error = %e, "Initial presence snapshot unavailable"),
        }

        debug!(topic = %topic, token = %record.token, "Joined presence topic");
        let forwarder = tokio::spawn(forward_counts(rx, count_tx));
        session.start_tracking(record, forwarder);
        session
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::broadcast;

    use shortshare_core::error::AppError;
    use shortshare_core::result::AppResult;
    use shortshare_core::traits::presence::PresenceSnapshot;

    use super::*;
    use crate::MemoryPresenceHub;

    fn tracker(hub: &Arc<MemoryPresenceHub>) -> PresenceTracker {
        PresenceTracker::new(hub.clone(), &RealtimeConfig::default())
    }

    async fn wait_for_count(session: &PresenceSession, expected: usize) {
        let mut rx = session.counts();
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|c| *c == expected))
            .await
            .expect("count did not settle in time")
            .ok();
        assert_eq!(session.count(), expected);
    }

    async fn wait_until_members(hub: &MemoryPresenceHub, topic: &str, expected: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if hub.snapshot(topic).await.unwrap().count() == expected {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("membership did not settle in time");
    }

    async fn wait_until_no_topics(hub: &MemoryPresenceHub) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while hub.topic_count().await != 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("topics were not released in time");
    }

    #[derive(Debug)]
    struct RefusingTransport;

    /// Subscribes through the hub but refuses to track anyone.
    #[derive(Debug)]
    struct TrackRefusingTransport(Arc<MemoryPresenceHub>);

    #[async_trait]
    impl PresenceTransport for TrackRefusingTransport {
        async fn subscribe(
            &self,
            topic: &str,
        ) -> AppResult<broadcast::Receiver<PresenceSnapshot>> {
            self.0.subscribe(topic).await
        }

        async fn track(&self, _topic: &str, _key: &str) -> AppResult<()> {
            Err(AppError::presence("track rejected"))
        }

        async fn untrack(&self, topic: &str, key: &str) -> AppResult<()> {
            self.0.untrack(topic, key).await
        }

        async fn snapshot(&self, topic: &str) -> AppResult<PresenceSnapshot> {
            self.0.snapshot(topic).await
        }
    }

    #[async_trait]
    impl PresenceTransport for RefusingTransport {
        async fn subscribe(
            &self,
            _topic: &str,
        ) -> AppResult<broadcast::Receiver<PresenceSnapshot>> {
            Err(AppError::presence("realtime service unavailable"))
        }

        async fn track(&self, _topic: &str, _key: &str) -> AppResult<()> {
            Err(AppError::presence("realtime service unavailable"))
        }

        async fn untrack(&self, _topic: &str, _key: &str) -> AppResult<()> {
            Ok(())
        }

        async fn snapshot(&self, topic: &str) -> AppResult<PresenceSnapshot> {
            Ok(PresenceSnapshot {
                topic: topic.to_string(),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_topic_name() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let share_id = ShareId::new();
        assert_eq!(
            tracker(&hub).topic_for(&share_id),
            format!("share-presence-{share_id}")
        );
    }

    #[tokio::test]
    async fn test_single_viewer_counts_one() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let session = tracker(&hub).join(&ShareId::new()).await;

        assert_eq!(session.state(), PresenceState::Tracking);
        assert_eq!(session.count(), 1);
    }

    #[tokio::test]
    async fn test_joins_and_leaves_update_every_viewer() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let tracker = tracker(&hub);
        let share_id = ShareId::new();

        let first = tracker.join(&share_id).await;
        let second = tracker.join(&share_id).await;
        let mut third = tracker.join(&share_id).await;

        wait_for_count(&first, 3).await;
        wait_for_count(&second, 3).await;
        wait_for_count(&third, 3).await;

        third.leave().await;
        assert_eq!(third.state(), PresenceState::Disconnected);
        wait_for_count(&first, 2).await;
        wait_for_count(&second, 2).await;
    }

    #[tokio::test]
    async fn test_other_shares_are_not_counted() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let tracker = tracker(&hub);

        let here = tracker.join(&ShareId::new()).await;
        let _elsewhere = tracker.join(&ShareId::new()).await;

        tokio::task::yield_now().await;
        assert_eq!(here.count(), 1);
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let tracker = tracker(&hub);
        let share_id = ShareId::new();
        let topic = tracker.topic_for(&share_id);

        let mut stay = tracker.join(&share_id).await;
        let mut go = tracker.join(&share_id).await;
        wait_until_members(&hub, &topic, 2).await;

        go.leave().await;
        go.leave().await;

        wait_until_members(&hub, &topic, 1).await;
        wait_for_count(&stay, 1).await;

        stay.leave().await;
        assert_eq!(hub.topic_count().await, 0);
    }

    #[tokio::test]
    async fn test_leaving_releases_topic() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let tracker = tracker(&hub);

        for _ in 0..5 {
            let mut session = tracker.join(&ShareId::new()).await;
            assert_eq!(session.state(), PresenceState::Tracking);
            session.leave().await;
        }

        assert_eq!(hub.topic_count().await, 0);
    }

    #[tokio::test]
    async fn test_dropping_session_releases_membership() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let tracker = tracker(&hub);
        let share_id = ShareId::new();
        let topic = tracker.topic_for(&share_id);

        let session = tracker.join(&share_id).await;
        wait_until_members(&hub, &topic, 1).await;

        drop(session);
        wait_until_members(&hub, &topic, 0).await;
        wait_until_no_topics(&hub).await;
    }

    #[tokio::test]
    async fn test_failed_track_releases_topic() {
        let hub = Arc::new(MemoryPresenceHub::new(8));
        let transport = Arc::new(TrackRefusingTransport(hub.clone()));
        let tracker = PresenceTracker::new(transport, &RealtimeConfig::default());

        let session = tracker.join(&ShareId::new()).await;

        assert!(session.is_degraded());
        assert_eq!(session.count(), 1);
        assert_eq!(hub.topic_count().await, 0);
    }

    #[tokio::test]
    async fn test_refused_transport_degrades_to_one() {
        let tracker = PresenceTracker::new(Arc::new(RefusingTransport), &RealtimeConfig::default());
        let mut session = tracker.join(&ShareId::new()).await;

        assert!(session.is_degraded());
        assert_eq!(session.state(), PresenceState::Disconnected);
        assert_eq!(session.count(), 1);

        session.leave().await;
        assert_eq!(session.count(), 1);
    }
}
