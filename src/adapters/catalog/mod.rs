//! Book catalog adapters.

mod http_catalog;
mod mock;

pub use http_catalog::{CatalogConfig, HttpBookCatalog};
pub use mock::MockBookCatalog;
