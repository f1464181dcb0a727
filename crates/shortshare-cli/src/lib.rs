//! # shortshare-cli
//!
//! Command-line surface of ShortShare: create text, code, and files shares,
//! open a share link, download attachments, and watch a share's countdown
//! and live viewers.

pub mod commands;
pub mod context;
pub mod output;

pub use commands::Cli;
pub use context::AppContext;
