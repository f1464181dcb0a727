//! [`ShareStore`](crate::store::ShareStore) implementations.

pub mod memory;
pub mod share;

pub use memory::MemoryShareStore;
pub use share::PgShareStore;
