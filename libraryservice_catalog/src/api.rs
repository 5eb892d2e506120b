use serde::{Deserialize, Serialize};

pub type Isbn = String;
pub type PatronId = String;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TitleSummary {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub borrower_count: usize,
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CatalogEntry {
    pub isbn: Isbn,
    pub title: String,
}
