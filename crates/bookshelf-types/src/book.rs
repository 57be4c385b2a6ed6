use serde::{Deserialize, Serialize};

/// Internal surrogate key assigned by the storage engine.
///
/// Never surfaced over the wire; books are addressed by ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

/// A book as it travels over the wire.
///
/// Field names match the JSON representation exactly, including the
/// upper-case `ISBN` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub publication_year: i64,
    #[serde(rename = "ISBN")]
    pub isbn: String,
}

/// A book as persisted, including the storage-assigned surrogate id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: i64,
    pub isbn: String,
}

/// The mutable part of a book. ISBN is excluded: the lookup key governs identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub publication_year: i64,
}

impl From<StoredBook> for Book {
    fn from(stored: StoredBook) -> Self {
        Self {
            title: stored.title,
            author: stored.author,
            publication_year: stored.publication_year,
            isbn: stored.isbn,
        }
    }
}

impl From<Book> for BookChanges {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
        }
    }
}
