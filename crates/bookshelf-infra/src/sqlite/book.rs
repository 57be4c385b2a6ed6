//! SQLite book repository implementation.
//!
//! Implements `BookRepository` from `bookshelf-core` using sqlx with split
//! read/write pools. Every write runs inside its own transaction; an early
//! return drops the transaction, which rolls it back.

use bookshelf_core::repository::book::BookRepository;
use bookshelf_types::book::{Book, BookChanges, BookId, StoredBook};
use bookshelf_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `BookRepository`.
#[derive(Clone)]
pub struct SqliteBookRepository {
    pool: DatabasePool,
}

impl SqliteBookRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain StoredBook.
struct BookRow {
    id: i64,
    title: String,
    author: String,
    publication_year: i64,
    isbn: String,
}

impl BookRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            publication_year: row.try_get("publication_year")?,
            isbn: row.try_get("isbn")?,
        })
    }

    fn into_book(self) -> StoredBook {
        StoredBook {
            id: BookId(self.id),
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            isbn: self.isbn,
        }
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredBook, RepositoryError> {
    BookRow::from_row(row)
        .map(BookRow::into_book)
        .map_err(query_error)
}

const SELECT_BY_ISBN: &str =
    "SELECT id, title, author, publication_year, isbn FROM books WHERE isbn = ?";

impl BookRepository for SqliteBookRepository {
    async fn create(&self, book: &Book) -> Result<StoredBook, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            "INSERT INTO books (title, author, publication_year, isbn) VALUES (?, ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(&book.isbn)
        .execute(&mut *tx)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(RepositoryError::Conflict(format!(
                    "isbn '{}' already exists",
                    book.isbn
                )));
            }
            Err(e) => return Err(query_error(e)),
        };

        tx.commit().await.map_err(query_error)?;

        Ok(StoredBook {
            id: BookId(id),
            title: book.title.clone(),
            author: book.author.clone(),
            publication_year: book.publication_year,
            isbn: book.isbn.clone(),
        })
    }

    async fn list_all(&self) -> Result<Vec<StoredBook>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, title, author, publication_year, isbn FROM books ORDER BY id ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter().map(map_row).collect()
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<StoredBook>, RepositoryError> {
        let row = sqlx::query(SELECT_BY_ISBN)
            .bind(isbn)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn update(
        &self,
        isbn: &str,
        changes: &BookChanges,
    ) -> Result<Option<StoredBook>, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let row = sqlx::query(SELECT_BY_ISBN)
            .bind(isbn)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(query_error)?;
            return Ok(None);
        };
        let existing = map_row(&row)?;

        sqlx::query("UPDATE books SET title = ?, author = ?, publication_year = ? WHERE id = ?")
            .bind(&changes.title)
            .bind(&changes.author)
            .bind(changes.publication_year)
            .bind(existing.id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        Ok(Some(StoredBook {
            id: existing.id,
            title: changes.title.clone(),
            author: changes.author.clone(),
            publication_year: changes.publication_year,
            isbn: existing.isbn,
        }))
    }

    async fn delete(&self, isbn: &str) -> Result<Option<StoredBook>, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let row = sqlx::query(SELECT_BY_ISBN)
            .bind(isbn)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(query_error)?;
            return Ok(None);
        };
        let snapshot = map_row(&row)?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(snapshot.id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        Ok(Some(snapshot))
    }
}
