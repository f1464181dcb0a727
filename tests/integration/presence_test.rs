//! Integration tests for live viewer presence.

use std::time::Duration;

use shortshare_core::traits::PresenceTransport;
use shortshare_realtime::{PresenceSession, PresenceState};

use crate::helpers::TestApp;

async fn settle(session: &PresenceSession, expected: usize) {
    let mut counts = session.counts();
    tokio::time::timeout(Duration::from_secs(2), counts.wait_for(|c| *c == expected))
        .await
        .expect("viewer count did not settle")
        .ok();
    assert_eq!(session.count(), expected);
}

#[tokio::test]
async fn test_viewers_of_a_share_see_each_other() {
    let app = TestApp::new().await;
    let share_id = app
        .shares
        .create_text_share("hello", false, None)
        .await
        .unwrap();

    let alice = app.presence.join(&share_id).await;
    settle(&alice, 1).await;

    let mut bob = app.presence.join(&share_id).await;
    assert_eq!(bob.state(), PresenceState::Tracking);
    settle(&alice, 2).await;
    settle(&bob, 2).await;

    let share = app.shares.get_share(&share_id).await.unwrap();
    assert_eq!(app.shares.stats(&share, bob.count()).viewers, 2);

    bob.leave().await;
    settle(&alice, 1).await;
    assert_eq!(app.hub.topic_count().await, 1);

    drop(alice);
    let topic = app.presence.topic_for(&share_id);
    tokio::time::timeout(Duration::from_secs(2), async {
        while app.hub.snapshot(&topic).await.unwrap().count() > 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("dropped session was not released");

    tokio::time::timeout(Duration::from_secs(2), async {
        while app.hub.topic_count().await > 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("presence topic outlived its last viewer");
}
