//! Book catalog port.
//!
//! Debates are registered against books resolved from an external
//! catalog by ISBN. A missing book fails registration with
//! `BookNotFound`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Book record as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBook {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub cover_url: Option<String>,
}

/// Port for the external book catalog.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Look up a book by ISBN.
    ///
    /// Returns `None` when the catalog has no such book.
    ///
    /// # Errors
    ///
    /// - `InternalError` on transport failure
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<CatalogBook>, DomainError>;
}
