//! # shortshare-database
//!
//! Relational store access for ShortShare. [`ShareStore`] is the narrow
//! insert/select/update surface the share service needs; it is implemented
//! for PostgreSQL and for an in-process map used by single-node setups and
//! tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryShareStore, PgShareStore};
pub use store::ShareStore;
