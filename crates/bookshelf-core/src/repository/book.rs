//! Book repository trait definition.

use bookshelf_types::book::{Book, BookChanges, StoredBook};
use bookshelf_types::error::RepositoryError;

/// Repository trait for book persistence.
///
/// Lookups return `Ok(None)` for a missing ISBN and reserve `Err` for genuine
/// storage failures. Every method runs as its own unit of work: writes are
/// committed before the future resolves, or rolled back on failure.
///
/// Implementations live in bookshelf-infra (e.g., SqliteBookRepository).
pub trait BookRepository: Send + Sync {
    /// Insert a new book. Returns the record as persisted.
    fn create(
        &self,
        book: &Book,
    ) -> impl std::future::Future<Output = Result<StoredBook, RepositoryError>> + Send;

    /// All books in insertion order.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<StoredBook>, RepositoryError>> + Send;

    /// Get a book by its ISBN.
    fn find_by_isbn(
        &self,
        isbn: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredBook>, RepositoryError>> + Send;

    /// Overwrite title, author and publication year of the book with `isbn`.
    fn update(
        &self,
        isbn: &str,
        changes: &BookChanges,
    ) -> impl std::future::Future<Output = Result<Option<StoredBook>, RepositoryError>> + Send;

    /// Remove the book with `isbn`, returning it as it was before removal.
    fn delete(
        &self,
        isbn: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredBook>, RepositoryError>> + Send;
}
