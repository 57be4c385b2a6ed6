//! Axum router configuration with middleware.
//!
//! Book routes live under `/books/`. A bare `/books` redirects there with a
//! 307 so method and body survive. Unknown paths answer 404 and unsupported
//! methods 405, with the same `{"detail": ...}` body shape as every other
//! error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{any, get};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/books/",
            get(handlers::book::list_books).post(handlers::book::create_book),
        )
        .route(
            "/books/{isbn}",
            get(handlers::book::get_book)
                .put(handlers::book::update_book)
                .delete(handlers::book::delete_book),
        )
        .route("/books", any(|| async { Redirect::temporary("/books/") }))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": "Not Found" })),
    )
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "detail": "Method Not Allowed" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use bookshelf_infra::sqlite::pool::{default_database_url, DatabasePool};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let dir = tempfile::tempdir().unwrap();
        let url = default_database_url(dir.path());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        build_router(AppState::new(pool))
    }

    async fn send_raw(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send_raw(router, method, uri, body.map(|v| v.to_string())).await
    }

    fn book(isbn: &str, title: &str) -> Value {
        json!({
            "title": title,
            "author": "N. K. Jemisin",
            "publication_year": 2015,
            "ISBN": isbn,
        })
    }

    #[tokio::test]
    async fn test_create_returns_submitted_book() {
        let router = test_router().await;
        let payload = book("111", "The Fifth Season");

        let (status, body) = send(&router, Method::POST, "/books/", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_create_invalid_year_creates_nothing() {
        let router = test_router().await;
        let mut payload = book("111", "The Fifth Season");
        payload["publication_year"] = json!("abc");

        let (status, body) = send(&router, Method::POST, "/books/", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "publication_year"]));
        assert_eq!(body["detail"][0]["type"], "type_error.integer");

        let (status, list) = send(&router, Method::GET, "/books/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_missing_field_rejected() {
        let router = test_router().await;
        let payload = json!({"title": "T", "author": "A", "publication_year": 2000});

        let (status, body) = send(&router, Method::POST, "/books/", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{
                "loc": ["body", "ISBN"],
                "msg": "field required",
                "type": "value_error.missing",
            }]})
        );
    }

    #[tokio::test]
    async fn test_create_malformed_json_rejected() {
        let router = test_router().await;
        let (status, body) =
            send_raw(&router, Method::POST, "/books/", Some("{not json".to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    }

    #[tokio::test]
    async fn test_list_returns_created_books() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "A"))).await;
        send(&router, Method::POST, "/books/", Some(book("222", "B"))).await;

        let (status, list) = send(&router, Method::GET, "/books/", None).await;
        assert_eq!(status, StatusCode::OK);

        let mut books = list.as_array().unwrap().clone();
        books.sort_by_key(|b| b["ISBN"].as_str().unwrap().to_string());
        assert_eq!(books, vec![book("111", "A"), book("222", "B")]);
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "A"))).await;

        let (status, body) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, book("111", "A"));

        let (status, body) = send(&router, Method::GET, "/books/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Book not found"}));
    }

    #[tokio::test]
    async fn test_update_keeps_path_isbn() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "Old"))).await;

        let changes = json!({
            "title": "The Obelisk Gate",
            "author": "Jemisin",
            "publication_year": 2016,
            "ISBN": "not-111",
        });
        let (status, body) = send(&router, Method::PUT, "/books/111", Some(changes)).await;
        assert_eq!(status, StatusCode::OK);
        let expected = json!({
            "title": "The Obelisk Gate",
            "author": "Jemisin",
            "publication_year": 2016,
            "ISBN": "111",
        });
        assert_eq!(body, expected);

        let (_, fetched) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(fetched, expected);

        let (status, _) = send(&router, Method::GET, "/books/not-111", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_creates_nothing() {
        let router = test_router().await;

        let (status, body) =
            send(&router, Method::PUT, "/books/999", Some(book("999", "Ghost"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Book not found"}));

        let (_, list) = send(&router, Method::GET, "/books/", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_update_invalid_body_rejected_before_lookup() {
        let router = test_router().await;

        // Validation wins even when the ISBN does not exist
        let (status, _) = send(
            &router,
            Method::PUT,
            "/books/999",
            Some(json!({"title": "T"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot_then_not_found() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "A"))).await;

        let (status, body) = send(&router, Method::DELETE, "/books/111", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, book("111", "A"));

        let (status, _) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&router, Method::DELETE, "/books/111", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Book not found"}));
    }

    #[tokio::test]
    async fn test_duplicate_isbn_is_server_error() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "A"))).await;

        let (status, body) = send(&router, Method::POST, "/books/", Some(book("111", "B"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal Server Error"}));

        let (_, fetched) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(fetched, book("111", "A"));
    }

    #[tokio::test]
    async fn test_round_trip_leaves_state_unchanged() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("222", "Keep"))).await;
        let (_, before) = send(&router, Method::GET, "/books/", None).await;

        send(&router, Method::POST, "/books/", Some(book("111", "Temp"))).await;
        let (status, _) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(status, StatusCode::OK);
        send(&router, Method::DELETE, "/books/111", None).await;

        let (_, after) = send(&router, Method::GET, "/books/", None).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_land() {
        let router = test_router().await;

        let requests = (0..16).map(|i| {
            let router = router.clone();
            async move {
                send(&router, Method::POST, "/books/", Some(book(&i.to_string(), "Copy"))).await
            }
        });
        let results = spawn_all(requests).await;
        assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));

        let (_, list) = send(&router, Method::GET, "/books/", None).await;
        assert_eq!(list.as_array().unwrap().len(), 16);
    }

    async fn spawn_all<F>(futures: impl Iterator<Item = F>) -> Vec<F::Output>
    where
        F: std::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handles: Vec<_> = futures.map(tokio::spawn).collect();
        let mut outputs = Vec::with_capacity(handles.len());
        for handle in handles {
            outputs.push(handle.await.unwrap());
        }
        outputs
    }

    #[tokio::test]
    async fn test_bare_collection_path_redirects() {
        let router = test_router().await;
        let response = router
            .oneshot(Request::builder().uri("/books").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/books/");
    }

    #[tokio::test]
    async fn test_unsupported_method_has_detail_body() {
        let router = test_router().await;
        send(&router, Method::POST, "/books/", Some(book("111", "A"))).await;

        let (status, body) = send(&router, Method::PATCH, "/books/111", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"detail": "Method Not Allowed"}));

        let (status, body) = send(&router, Method::DELETE, "/books/", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"detail": "Method Not Allowed"}));

        // The record is untouched
        let (status, _) = send(&router, Method::GET, "/books/111", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let router = test_router().await;
        let (status, body) = send(&router, Method::GET, "/authors/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Not Found"}));
    }
}
