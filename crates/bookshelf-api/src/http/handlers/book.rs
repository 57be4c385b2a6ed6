//! Book CRUD handlers for the REST API.
//!
//! Each handler performs exactly one storage operation, so a request maps to
//! a single unit of work.

use axum::extract::{Path, State};
use axum::Json;

use bookshelf_types::book::Book;

use crate::http::error::AppError;
use crate::http::extractors::book::BookPayload;
use crate::state::AppState;

/// POST /books/ - Create a new book.
pub async fn create_book(
    State(state): State<AppState>,
    BookPayload(book): BookPayload,
) -> Result<Json<Book>, AppError> {
    let created = state.book_service.create_book(book).await?;
    Ok(Json(created))
}

/// GET /books/ - List every book.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.book_service.list_books().await?;
    Ok(Json(books))
}

/// GET /books/{isbn} - Get a book by ISBN.
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = state.book_service.get_book(&isbn).await?;
    Ok(Json(book))
}

/// PUT /books/{isbn} - Replace title, author and publication year.
///
/// The ISBN in the body is validated but ignored; the path decides which
/// record changes.
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    BookPayload(book): BookPayload,
) -> Result<Json<Book>, AppError> {
    if book.isbn != isbn {
        tracing::debug!(path = %isbn, body = %book.isbn, "ignoring ISBN from request body");
    }
    let updated = state.book_service.update_book(&isbn, book.into()).await?;
    Ok(Json(updated))
}

/// DELETE /books/{isbn} - Delete a book, returning its last state.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, AppError> {
    let deleted = state.book_service.delete_book(&isbn).await?;
    Ok(Json(deleted))
}
