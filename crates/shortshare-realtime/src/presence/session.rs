//! A viewer's membership on one presence topic.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use shortshare_core::traits::presence::{PresenceSnapshot, PresenceTransport};
use shortshare_entity::presence::PresenceRecord;

/// Lifecycle of a [`PresenceSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceState {
    /// Not on the topic: never joined, left, or degraded.
    Disconnected,
    /// Subscribing and announcing the token.
    Joining,
    /// Subscribed with the token tracked.
    Tracking,
}

impl PresenceState {
    /// Return the state as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Joining => "joining",
            Self::Tracking => "tracking",
        }
    }
}

impl std::fmt::Display for PresenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scoped handle for one viewer on one share.
///
/// The viewer count is published through a [`watch`] channel. Membership is
/// released by [`leave`](Self::leave) or, failing that, when the session is
/// dropped inside a Tokio runtime.
#[derive(Debug)]
pub struct PresenceSession {
    topic: String,
    transport: Arc<dyn PresenceTransport>,
    state: PresenceState,
    record: Option<PresenceRecord>,
    forwarder: Option<JoinHandle<()>>,
    counts: watch::Receiver<usize>,
    degraded: bool,
}

impl PresenceSession {
    pub(crate) fn new(
        topic: String,
        transport: Arc<dyn PresenceTransport>,
        counts: watch::Receiver<usize>,
    ) -> Self {
        Self {
            topic,
            transport,
            state: PresenceState::Disconnected,
            record: None,
            forwarder: None,
            counts,
            degraded: false,
        }
    }

    pub(crate) fn set_state(&mut self, state: PresenceState) {
        self.state = state;
    }

    pub(crate) fn degrade(&mut self) {
        self.state = PresenceState::Disconnected;
        self.degraded = true;
    }

    pub(crate) fn start_tracking(&mut self, record: PresenceRecord, forwarder: JoinHandle<()>) {
        self.record = Some(record);
        self.forwarder = Some(forwarder);
        self.state = PresenceState::Tracking;
    }

    /// Topic this session is on.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Whether joining failed and the count is the static fallback.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Latest distinct-viewer count, including this viewer.
    pub fn count(&self) -> usize {
        *self.counts.borrow()
    }

    /// A receiver notified whenever the count is republished.
    pub fn counts(&self) -> watch::Receiver<usize> {
        self.counts.clone()
    }

    /// Stop listening and withdraw this viewer's token. Safe to call twice.
    ///
    /// The topic subscription is released before the token is untracked so
    /// the transport sees a topic with no subscribers left.
    pub async fn leave(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            stop_forwarder(forwarder).await;
        }
        if let Some(record) = self.record.take() {
            if let Err(e) = self.transport.untrack(&self.topic, &record.key()).await {
                warn!(topic = %self.topic, error = %e, "Presence untrack failed");
            } else {
                debug!(topic = %self.topic, token = %record.token, "Left presence topic");
            }
        }
        self.state = PresenceState::Disconnected;
    }
}

impl Drop for PresenceSession {
    fn drop(&mut self) {
        let forwarder = self.forwarder.take();
        let Some(record) = self.record.take() else {
            if let Some(forwarder) = forwarder {
                forwarder.abort();
            }
            return;
        };

        let transport = Arc::clone(&self.transport);
        let topic = std::mem::take(&mut self.topic);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Some(forwarder) = forwarder {
                        stop_forwarder(forwarder).await;
                    }
                    if let Err(e) = transport.untrack(&topic, &record.key()).await {
                        warn!(topic = %topic, error = %e, "Presence untrack on drop failed");
                    }
                });
            }
            Err(_) => {
                if let Some(forwarder) = forwarder {
                    forwarder.abort();
                }
                warn!(topic = %topic, "Presence session dropped outside a runtime; token not untracked");
            }
        }
    }
}

/// Abort the forwarder and wait until its topic receiver is dropped.
async fn stop_forwarder(forwarder: JoinHandle<()>) {
    forwarder.abort();
    if let Err(e) = forwarder.await {
        if !e.is_cancelled() {
            warn!(error = %e, "Presence forwarder panicked");
        }
    }
}

/// Republish every snapshot's member count until the topic channel closes.
pub(crate) async fn forward_counts(
    mut rx: broadcast::Receiver<PresenceSnapshot>,
    counts: watch::Sender<usize>,
) {
    loop {
        match rx.recv().await {
            Ok(snapshot) => {
                counts.send_replace(snapshot.count());
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "Presence receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
