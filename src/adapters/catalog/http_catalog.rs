//! HTTP book catalog adapter.
//!
//! Thin client over an external catalog's REST lookup. A 404 maps to
//! `Ok(None)` (the book simply isn't there); transport failures map to
//! `InternalError` and fail the registration outright.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{BookCatalog, CatalogBook};

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Catalog adapter over HTTP.
pub struct HttpBookCatalog {
    config: CatalogConfig,
    client: Client,
}

impl HttpBookCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, client })
    }

    fn book_url(&self, isbn: &str) -> String {
        format!("{}/books/{}", self.config.base_url, isbn)
    }
}

#[derive(Debug, Deserialize)]
struct BookJson {
    isbn: String,
    title: String,
    author: Option<String>,
    cover_url: Option<String>,
}

#[async_trait]
impl BookCatalog for HttpBookCatalog {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<CatalogBook>, DomainError> {
        let response = self
            .client
            .get(self.book_url(isbn))
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Catalog request failed: {}", e),
                )
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Catalog returned {}", response.status()),
            ));
        }

        let book: BookJson = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Malformed catalog response: {}", e),
            )
        })?;

        Ok(Some(CatalogBook {
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            cover_url: book.cover_url,
        }))
    }
}
