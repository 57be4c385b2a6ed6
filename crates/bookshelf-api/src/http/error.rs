//! Application error type mapping to HTTP status codes.
//!
//! Every error body has a single `detail` key: a message string for 404/500,
//! or a list of field errors for 422.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use bookshelf_types::error::BookError;

/// One offending field in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the field, e.g. `["body", "publication_year"]`.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Machine-readable error code.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Book-related errors from the service layer.
    Book(BookError),
    /// Request body failed shape or type checks.
    Validation(Vec<FieldError>),
    /// The transport refused the request before validation (e.g. body too large).
    Rejected { status: StatusCode, message: String },
}

impl From<BookError> for AppError {
    fn from(e: BookError) -> Self {
        AppError::Book(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Book(BookError::NotFound) => {
                tracing::debug!("book not found");
                (StatusCode::NOT_FOUND, json!("Book not found"))
            }
            AppError::Book(BookError::StorageError(msg)) => {
                tracing::error!(error = %msg, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!("Internal Server Error"))
            }
            AppError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "request body rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, json!(errors))
            }
            AppError::Rejected { status, message } => (status, json!(message)),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
