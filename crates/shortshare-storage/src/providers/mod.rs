//! Blob store providers.

#[cfg(feature = "local")]
pub mod local;
pub mod memory;

#[cfg(feature = "local")]
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
