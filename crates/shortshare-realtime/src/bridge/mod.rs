//! Presence transports.

pub mod memory_pubsub;

pub use memory_pubsub::MemoryPresenceHub;
