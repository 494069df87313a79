use thiserror::Error;

use crate::storage::StoreError;

/// Rejected request input. The display strings are sent to clients as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid book data")]
    InvalidBody,
    #[error("Invalid book id")]
    InvalidId,
    #[error("Invalid title")]
    InvalidTitle,
    #[error("Invalid author")]
    InvalidAuthor,
    #[error("Invalid available flag")]
    InvalidAvailable,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("book {0} not found")]
    NotFound(i64),
    #[error("no book id left above {0}")]
    IdExhausted(i64),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
