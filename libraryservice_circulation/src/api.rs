use serde::{Deserialize, Serialize};

use libraryservice_catalog::api::PatronId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatronSummary {
    pub reader_id: PatronId,
    pub name: String,
    pub email: String,
    pub borrowed_count: usize,
    pub max_books: usize,
    pub outstanding_fines: f64,
    pub is_active: bool,
    pub membership_date: String,
}
