//! Convenience result type alias for Warden.

use crate::error::AppError;

/// A specialized `Result` type for Warden infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;
