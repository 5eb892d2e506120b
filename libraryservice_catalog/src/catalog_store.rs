pub use in_memory_catalog_store::InMemoryCatalogStore;

use crate::api::{CatalogEntry, Isbn};
use crate::title::Title;

mod in_memory_catalog_store;

#[derive(Debug, thiserror::Error)]
pub enum CatalogStoreError {
    #[error("Title {0} not found")]
    TitleNotFound(Isbn),

    #[error("Title {0} already registered")]
    DuplicateIsbn(Isbn),
}

/// Catalog aggregator the administrative component routes title
/// registration through. Staff operations only validate permission and
/// signal intent; the orchestrating caller performs the store mutation.
pub trait CatalogStore: Send + Sync {
    /// Adds a title to the catalog, keyed by its ISBN
    fn add_title(&self, title: Title) -> Result<(), CatalogStoreError>;
    /// Removes a title from the catalog, returning it if it was present
    fn remove_title(&self, isbn: &str) -> Result<Title, CatalogStoreError>;
    /// Retrieves a snapshot of the title
    fn get_title(&self, isbn: &str) -> Result<Title, CatalogStoreError>;
    /// Lists all titles in the catalog
    fn list_titles(&self) -> Vec<CatalogEntry>;
}
