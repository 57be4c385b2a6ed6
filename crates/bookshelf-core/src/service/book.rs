//! Book management service.
//!
//! Maps the repository's absent/error/success outcomes onto `BookError` and
//! strips storage-internal fields before records leave the core.

use bookshelf_types::book::{Book, BookChanges};
use bookshelf_types::error::BookError;

use crate::repository::book::BookRepository;

/// Service orchestrating the book lifecycle.
///
/// Generic over the repository trait so bookshelf-core never depends on
/// bookshelf-infra.
pub struct BookService<R: BookRepository> {
    book_repo: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(book_repo: R) -> Self {
        Self { book_repo }
    }

    /// Persist a new book and return it as stored.
    pub async fn create_book(&self, book: Book) -> Result<Book, BookError> {
        let stored = self.book_repo.create(&book).await?;
        tracing::debug!(isbn = %stored.isbn, "book created");
        Ok(stored.into())
    }

    /// List every book.
    pub async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        let books = self.book_repo.list_all().await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    /// Get a book by ISBN.
    pub async fn get_book(&self, isbn: &str) -> Result<Book, BookError> {
        self.book_repo
            .find_by_isbn(isbn)
            .await?
            .map(Book::from)
            .ok_or(BookError::NotFound)
    }

    /// Overwrite the mutable fields of the book with `isbn`.
    ///
    /// The ISBN itself never changes, whatever the caller sent in the body.
    pub async fn update_book(&self, isbn: &str, changes: BookChanges) -> Result<Book, BookError> {
        let updated = self
            .book_repo
            .update(isbn, &changes)
            .await?
            .ok_or(BookError::NotFound)?;
        tracing::debug!(isbn = %updated.isbn, "book updated");
        Ok(updated.into())
    }

    /// Delete the book with `isbn` and return its last state.
    pub async fn delete_book(&self, isbn: &str) -> Result<Book, BookError> {
        let deleted = self
            .book_repo
            .delete(isbn)
            .await?
            .ok_or(BookError::NotFound)?;
        tracing::debug!(isbn = %deleted.isbn, "book deleted");
        Ok(deleted.into())
    }
}
