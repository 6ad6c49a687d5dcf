use serde::{Deserialize, Serialize};

/// A recommendable book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    /// Stable identifier of the book
    pub book_id: i32,
    /// Display title
    pub title: String,
}

impl Book {
    pub fn new(book_id: i32, title: impl Into<String>) -> Self {
        Self {
            book_id,
            title: title.into(),
        }
    }
}

/// Ordered set of books. Position `i` in the catalog is slot `i` of every
/// rating vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Number of books, i.e. the width every rating vector must have
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book at a catalog position
    pub fn get(&self, position: usize) -> Option<&Book> {
        self.books.get(position)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }
}
