use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::api::{CatalogEntry, Isbn};
use crate::catalog_store::{CatalogStore, CatalogStoreError};
use crate::title::Title;

#[derive(Default)]
pub struct InMemoryCatalogStore {
    titles: parking_lot::RwLock<HashMap<Isbn, Title>>,
}

impl CatalogStore for InMemoryCatalogStore {
    fn add_title(&self, title: Title) -> Result<(), CatalogStoreError> {
        let mut titles_lock = self.titles.write();

        match titles_lock.entry(title.isbn().to_string()) {
            Entry::Occupied(occupied) => {
                Err(CatalogStoreError::DuplicateIsbn(occupied.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(title);
                Ok(())
            }
        }
    }

    fn remove_title(&self, isbn: &str) -> Result<Title, CatalogStoreError> {
        self.titles
            .write()
            .remove(isbn)
            .ok_or_else(|| CatalogStoreError::TitleNotFound(isbn.to_string()))
    }

    fn get_title(&self, isbn: &str) -> Result<Title, CatalogStoreError> {
        self.titles
            .read()
            .get(isbn)
            .cloned()
            .ok_or_else(|| CatalogStoreError::TitleNotFound(isbn.to_string()))
    }

    fn list_titles(&self) -> Vec<CatalogEntry> {
        self.titles
            .read()
            .values()
            .map(|title| CatalogEntry {
                isbn: title.isbn().to_string(),
                title: title.title().to_string(),
            })
            .collect()
    }
}
