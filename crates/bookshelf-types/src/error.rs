use thiserror::Error;

/// Errors related to book operations.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("book not found")]
    NotFound,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in bookshelf-core).
///
/// A missing record is not an error at this level; repositories report it
/// as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for BookError {
    fn from(e: RepositoryError) -> Self {
        BookError::StorageError(e.to_string())
    }
}
