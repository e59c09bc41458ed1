//! Mock book catalog for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{BookCatalog, CatalogBook};

/// In-memory catalog keyed by ISBN.
pub struct MockBookCatalog {
    books: Mutex<HashMap<String, CatalogBook>>,
    fail: bool,
}

impl MockBookCatalog {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    /// A catalog whose lookups always fail.
    pub fn failing() -> Self {
        Self {
            books: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    /// Adds a book to the catalog.
    pub fn with_book(self, isbn: &str, title: &str) -> Self {
        self.books.lock().unwrap().insert(
            isbn.to_string(),
            CatalogBook {
                isbn: isbn.to_string(),
                title: title.to_string(),
                author: None,
                cover_url: None,
            },
        );
        self
    }
}

impl Default for MockBookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookCatalog for MockBookCatalog {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<CatalogBook>, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated catalog failure",
            ));
        }
        Ok(self.books.lock().unwrap().get(isbn).cloned())
    }
}
