//! Book body extractor with field-level validation.
//!
//! The body is parsed as loose JSON first and each field is checked on its
//! own, so a single response can name every offending field. Coercion is
//! permissive: numbers and booleans are accepted for text fields, and
//! booleans, floats (truncated) or numeric strings for `publication_year`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use bookshelf_types::book::Book;

use crate::http::error::{AppError, FieldError};

/// A request body that passed validation as a complete `Book`.
#[derive(Debug)]
pub struct BookPayload(pub Book);

impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        parse_book(&bytes).map(BookPayload).map_err(AppError::Validation)
    }
}

/// Parse and validate a raw request body.
pub fn parse_book(bytes: &[u8]) -> Result<Book, Vec<FieldError>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(vec![FieldError::new(
            &["body"],
            "field required",
            "value_error.missing",
        )]);
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        vec![FieldError::new(
            &["body"],
            format!("invalid JSON: {e}"),
            "value_error.jsondecode",
        )]
    })?;

    validate_book(&value)
}

/// Check presence and type of every book field, collecting all failures.
pub fn validate_book(value: &Value) -> Result<Book, Vec<FieldError>> {
    let Value::Object(fields) = value else {
        return Err(vec![FieldError::new(
            &["body"],
            "value is not a valid dict",
            "type_error.dict",
        )]);
    };

    let mut errors = Vec::new();
    let title = text_field(fields, "title", &mut errors);
    let author = text_field(fields, "author", &mut errors);
    let publication_year = integer_field(fields, "publication_year", &mut errors);
    let isbn = text_field(fields, "ISBN", &mut errors);

    match (title, author, publication_year, isbn) {
        (Some(title), Some(author), Some(publication_year), Some(isbn)) => Ok(Book {
            title,
            author,
            publication_year,
            isbn,
        }),
        _ => Err(errors),
    }
}

fn missing(name: &str) -> FieldError {
    FieldError::new(&["body", name], "field required", "value_error.missing")
}

fn null_value(name: &str) -> FieldError {
    FieldError::new(
        &["body", name],
        "none is not an allowed value",
        "type_error.none.not_allowed",
    )
}

fn text_field(fields: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(if *b { "True" } else { "False" }.to_string()),
        Some(Value::Null) => {
            errors.push(null_value(name));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(&["body", name], "str type expected", "type_error.str"));
            None
        }
        None => {
            errors.push(missing(name));
            None
        }
    }
}

fn integer_field(fields: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    let parsed = match fields.get(name) {
        None => {
            errors.push(missing(name));
            return None;
        }
        Some(Value::Null) => {
            errors.push(null_value(name));
            return None;
        }
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.push(FieldError::new(
            &["body", name],
            "value is not a valid integer",
            "type_error.integer",
        ));
    }
    parsed
}

/// Truncate toward zero, so `1999.7` becomes `1999`. NaN, infinities and
/// values outside `i64` are rejected.
fn truncate_float(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    in_range.then_some(f.trunc() as i64)
}
