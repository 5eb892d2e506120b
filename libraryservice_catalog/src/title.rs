use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::api::{Isbn, PatronId, TitleSummary};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TitleError {
    #[error("No copies of {0} available")]
    NoCopyAvailable(Isbn),

    #[error("Patron {patron_id} already holds a copy of {isbn}")]
    AlreadyLentTo { isbn: Isbn, patron_id: PatronId },

    #[error("Patron {patron_id} holds no copy of {isbn}")]
    NotLentTo { isbn: Isbn, patron_id: PatronId },

    #[error("Copy count adjustment must be positive")]
    ZeroCopyCount,

    #[error("Cannot remove {requested} copies of {isbn}: only {available} not on loan")]
    CopiesOnLoan {
        isbn: Isbn,
        requested: u32,
        available: u32,
    },
}

/// One catalog title with a number of physical, lendable copies.
///
/// Active loans are tracked per patron identifier together with the due
/// date assigned at lending time. Holds `available_copies ==
/// total_copies - active loans` after every mutation; every failing
/// operation leaves the title untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    isbn: Isbn,
    title: String,
    author: String,
    publication_year: i32,
    genre: String,
    total_copies: u32,
    available_copies: u32,
    loans: HashMap<PatronId, DateTime<Utc>>,
}

impl Title {
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: impl Into<String>,
        total_copies: u32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            publication_year,
            genre: genre.into(),
            total_copies,
            available_copies: total_copies,
            loans: HashMap::new(),
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    pub fn available_copies(&self) -> u32 {
        self.available_copies
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Lends one copy to `patron_id`, due `loan_period_days` after `now`.
    ///
    /// A patron may hold at most one copy of a given title at a time.
    pub fn lend(
        &mut self,
        patron_id: &str,
        now: DateTime<Utc>,
        loan_period_days: i64,
    ) -> Result<(), TitleError> {
        if self.available_copies == 0 {
            return Err(TitleError::NoCopyAvailable(self.isbn.clone()));
        }
        if self.loans.contains_key(patron_id) {
            return Err(TitleError::AlreadyLentTo {
                isbn: self.isbn.clone(),
                patron_id: patron_id.to_string(),
            });
        }

        let due = now + Duration::days(loan_period_days);
        self.loans.insert(patron_id.to_string(), due);
        self.available_copies -= 1;
        Ok(())
    }

    /// Takes back the copy lent to `patron_id`.
    pub fn accept_return(&mut self, patron_id: &str) -> Result<(), TitleError> {
        if self.loans.remove(patron_id).is_none() {
            return Err(TitleError::NotLentTo {
                isbn: self.isbn.clone(),
                patron_id: patron_id.to_string(),
            });
        }
        self.available_copies += 1;
        Ok(())
    }

    /// True if `patron_id` holds a copy past its due date. Overdueness is
    /// derived, never stored; an overdue copy can still be returned.
    pub fn is_overdue(&self, patron_id: &str, now: DateTime<Utc>) -> bool {
        self.loans.get(patron_id).is_some_and(|due| now > *due)
    }

    pub fn due_date(&self, patron_id: &str) -> Option<DateTime<Utc>> {
        self.loans.get(patron_id).copied()
    }

    pub fn add_copies(&mut self, num_copies: u32) -> Result<(), TitleError> {
        if num_copies == 0 {
            return Err(TitleError::ZeroCopyCount);
        }
        self.total_copies += num_copies;
        self.available_copies += num_copies;
        Ok(())
    }

    /// Removes copies that are not currently on loan.
    pub fn remove_copies(&mut self, num_copies: u32) -> Result<(), TitleError> {
        if num_copies == 0 {
            return Err(TitleError::ZeroCopyCount);
        }
        if num_copies > self.available_copies {
            return Err(TitleError::CopiesOnLoan {
                isbn: self.isbn.clone(),
                requested: num_copies,
                available: self.available_copies,
            });
        }
        self.total_copies -= num_copies;
        self.available_copies -= num_copies;
        Ok(())
    }

    pub fn borrower_count(&self) -> usize {
        self.loans.len()
    }

    pub fn summary(&self) -> TitleSummary {
        TitleSummary {
            isbn: self.isbn.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            publication_year: self.publication_year,
            genre: self.genre.clone(),
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            borrower_count: self.borrower_count(),
            is_available: self.is_available(),
        }
    }
}
