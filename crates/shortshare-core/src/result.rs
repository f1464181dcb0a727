//! Convenience result type alias for ShortShare.

use crate::error::AppError;

/// A specialized `Result` type for ShortShare operations.
pub type AppResult<T> = Result<T, AppError>;
