//! Share creation, retrieval, links, and statistics.

pub mod link;
pub mod service;
pub mod stats;
pub mod upload;

pub use link::LinkService;
pub use service::ShareService;
pub use stats::{ShareStats, format_size};
pub use upload::FileUpload;
