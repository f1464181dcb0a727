//! Per-share viewer presence.

pub mod session;
pub mod tracker;

pub use session::{PresenceSession, PresenceState};
pub use tracker::PresenceTracker;
