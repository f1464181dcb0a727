//! # shortshare-realtime
//!
//! Realtime presence for ShortShare. Provides:
//!
//! - an in-process presence topic service ([`MemoryPresenceHub`])
//! - per-share viewer tracking with a scoped session handle
//!   ([`PresenceTracker`], [`PresenceSession`])

pub mod bridge;
pub mod presence;

pub use bridge::memory_pubsub::MemoryPresenceHub;
pub use presence::session::{PresenceSession, PresenceState};
pub use presence::tracker::PresenceTracker;
