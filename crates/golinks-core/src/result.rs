//! Convenience result type alias for go-links.

use crate::error::AppError;

/// A specialized `Result` type for go-links operations.
pub type AppResult<T> = Result<T, AppError>;
