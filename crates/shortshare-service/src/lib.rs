//! # shortshare-service
//!
//! Business logic for ShortShare: creating and fetching ephemeral shares,
//! the fixed-TTL expiry policy with its countdown, share links, and the
//! statistics shown next to a share.

pub mod expiry;
pub mod share;

pub use expiry::{Clock, Countdown, ExpiryPolicy, ManualClock, Remaining, SystemClock};
pub use share::{FileUpload, LinkService, ShareService, ShareStats};
