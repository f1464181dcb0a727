//! Collaborator traits defined in `shortshare-core` and implemented by the
//! storage and realtime crates.

pub mod blob;
pub mod presence;

pub use blob::BlobStore;
pub use presence::{PresenceSnapshot, PresenceTransport};
