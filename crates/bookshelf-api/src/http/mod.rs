//! HTTP/REST API layer for Bookshelf.
//!
//! Axum-based REST API exposing book CRUD under `/books/`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
