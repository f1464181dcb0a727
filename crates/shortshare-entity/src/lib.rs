//! # shortshare-entity
//!
//! Domain entity models for ShortShare. Row structs mirror the `shares` and
//! `share_files` tables and derive `sqlx::FromRow`; [`share::Share`] is the
//! validated domain view that consumers match on.

pub mod presence;
pub mod share;
