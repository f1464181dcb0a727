//! # shortshare-storage
//!
//! Blob store implementations for ShortShare attachments. Every provider
//! enforces no-overwrite uploads and resolves public download URLs under a
//! configured base URL.

pub mod manager;
pub mod providers;
pub mod url;

pub use manager::build_blob_store;
pub use providers::{LocalBlobStore, MemoryBlobStore};
