//! Convenience result type alias for WoundCare.

use crate::error::AppError;

/// A specialized `Result` type for WoundCare operations.
pub type AppResult<T> = Result<T, AppError>;
