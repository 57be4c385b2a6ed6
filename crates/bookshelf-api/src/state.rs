//! Application state wiring the service to its storage.
//!
//! `AppState` is cloned into every request handler; the pool inside it is the
//! only process-wide resource.

use std::sync::Arc;

use bookshelf_core::service::book::BookService;
use bookshelf_infra::sqlite::book::SqliteBookRepository;
use bookshelf_infra::sqlite::pool::DatabasePool;

/// The book service pinned to the SQLite repository.
pub type ConcreteBookService = BookService<SqliteBookRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<ConcreteBookService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Wire services onto an already-open pool.
    pub fn new(db_pool: DatabasePool) -> Self {
        let book_repo = SqliteBookRepository::new(db_pool.clone());
        Self {
            book_service: Arc::new(BookService::new(book_repo)),
            db_pool,
        }
    }

    /// Open the database at `database_url` and wire services.
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;
        Ok(Self::new(db_pool))
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.db_pool.writer.close().await;
        self.db_pool.reader.close().await;
    }
}
