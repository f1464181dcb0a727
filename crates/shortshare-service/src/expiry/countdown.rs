//! Once-per-second countdown to a share's expiry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

use super::clock::Clock;
use super::policy::{ExpiryPolicy, Remaining};

/// Handle to a running countdown.
///
/// The task recomputes the remaining time every second and stops after
/// publishing [`Remaining::Expired`]. Dropping the handle stops it.
#[derive(Debug)]
pub struct Countdown {
    rx: watch::Receiver<Remaining>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start counting down to `expires_at` on the current runtime.
    pub fn start(expires_at: DateTime<Utc>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = watch::channel(ExpiryPolicy::remaining(expires_at, clock.now()));
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let remaining = ExpiryPolicy::remaining(expires_at, clock.now());
                tx.send_replace(remaining);
                if remaining.is_expired() || tx.is_closed() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Most recently published value.
    pub fn current(&self) -> Remaining {
        *self.rx.borrow()
    }

    /// A receiver notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<Remaining> {
        self.rx.clone()
    }

    /// Whether the countdown task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::expiry::clock::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_and_stops_when_expired() {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let countdown = Countdown::start(start + ChronoDuration::seconds(3), clock.clone());
        assert_eq!(countdown.current().to_string(), "00:00:03");

        let mut rx = countdown.subscribe();
        clock.advance(ChronoDuration::seconds(1));
        rx.wait_for(|r| r.total_seconds() == 2).await.unwrap();

        clock.advance(ChronoDuration::seconds(2));
        rx.wait_for(Remaining::is_expired).await.unwrap();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(countdown.is_finished());
        assert_eq!(countdown.current(), Remaining::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_expired_publishes_expired() {
        let now = Utc::now();
        let clock = Arc::new(ManualClock::new(now));
        let countdown = Countdown::start(now - ChronoDuration::minutes(1), clock);

        assert!(countdown.current().is_expired());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_the_task() {
        let now = Utc::now();
        let clock = Arc::new(ManualClock::new(now));
        let countdown = Countdown::start(now + ChronoDuration::hours(2), clock);
        let mut rx = countdown.subscribe();
        rx.borrow_and_update();

        drop(countdown);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.changed().await.is_err());
    }
}
