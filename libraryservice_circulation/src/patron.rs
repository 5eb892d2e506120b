use std::collections::HashMap;

use chrono::{DateTime, Utc};

use libraryservice_catalog::api::{Isbn, PatronId};

use crate::api::PatronSummary;
use crate::policy::LendingPolicy;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatronError {
    #[error("Borrow limit of {max_books} reached")]
    LimitReached { max_books: usize },

    #[error("Book {0} already borrowed")]
    AlreadyBorrowed(Isbn),

    #[error("Outstanding fines of {0:.2} must be paid first")]
    OutstandingFines(f64),

    #[error("Membership is suspended")]
    MembershipSuspended,

    #[error("Book {0} is not on loan to this patron")]
    NotBorrowed(Isbn),
}

/// A library member with a personal loan ledger and fine balance.
///
/// The ledger records the borrow date per ISBN; fines accrue at return
/// time for each late day. Every failing operation leaves the patron
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Patron {
    reader_id: PatronId,
    name: String,
    email: String,
    membership_date: DateTime<Utc>,
    borrowed: HashMap<Isbn, DateTime<Utc>>,
    max_books: usize,
    fines: f64,
    is_active: bool,
}

impl Patron {
    /// Creates an active patron with a generated `RDR-` identifier.
    pub fn new(name: impl Into<String>, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(generate_reader_id(), name, email, now)
    }

    pub fn with_id(
        reader_id: impl Into<PatronId>,
        name: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            reader_id: reader_id.into(),
            name: name.into(),
            email: email.into(),
            membership_date: now,
            borrowed: HashMap::new(),
            max_books: LendingPolicy::default().max_books,
            fines: 0.0,
            is_active: true,
        }
    }

    pub fn reader_id(&self) -> &str {
        &self.reader_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    pub fn borrow_date(&self, isbn: &str) -> Option<DateTime<Utc>> {
        self.borrowed.get(isbn).copied()
    }

    pub fn max_books(&self) -> usize {
        self.max_books
    }

    pub fn set_max_books(&mut self, max_books: usize) {
        self.max_books = max_books;
    }

    pub fn fines(&self) -> f64 {
        self.fines
    }

    pub fn clear_fines(&mut self) {
        self.fines = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Records a borrow of `isbn` at `now`.
    ///
    /// Rejected when the limit is reached, the ISBN is already out, any
    /// fine is outstanding, or the membership is suspended.
    pub fn borrow(&mut self, isbn: &str, now: DateTime<Utc>) -> Result<(), PatronError> {
        if self.borrowed.len() >= self.max_books {
            return Err(PatronError::LimitReached {
                max_books: self.max_books,
            });
        }
        if self.borrowed.contains_key(isbn) {
            return Err(PatronError::AlreadyBorrowed(isbn.to_string()));
        }
        if self.fines > 0.0 {
            return Err(PatronError::OutstandingFines(self.fines));
        }
        if !self.is_active {
            return Err(PatronError::MembershipSuspended);
        }

        self.borrowed.insert(isbn.to_string(), now);
        Ok(())
    }

    /// Removes `isbn` from the ledger and accrues the late fine, if any.
    ///
    /// Each started day past the due date (borrow date plus the policy's
    /// loan period) costs `policy.daily_fine`; a return at the due
    /// instant costs nothing. Returns the fine accrued by this return.
    pub fn return_book(
        &mut self,
        isbn: &str,
        now: DateTime<Utc>,
        policy: &LendingPolicy,
    ) -> Result<f64, PatronError> {
        let borrow_date = self
            .borrowed
            .get(isbn)
            .copied()
            .ok_or_else(|| PatronError::NotBorrowed(isbn.to_string()))?;

        let due = borrow_date + chrono::Duration::days(policy.loan_period_days);
        let fine = overdue_days(now, due) as f64 * policy.daily_fine;

        self.fines += fine;
        self.borrowed.remove(isbn);
        Ok(fine)
    }

    /// Pays down the fine balance, returning the change.
    ///
    /// Non-positive amounts are handed back untouched; overpayment zeroes
    /// the balance and returns the excess.
    pub fn pay(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return amount;
        }

        if amount >= self.fines {
            let change = amount - self.fines;
            self.fines = 0.0;
            change
        } else {
            self.fines -= amount;
            0.0
        }
    }

    pub fn can_borrow_more(&self) -> bool {
        self.borrowed.len() < self.max_books && self.fines == 0.0 && self.is_active
    }

    pub fn suspend(&mut self) {
        self.is_active = false;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn summary(&self) -> PatronSummary {
        PatronSummary {
            reader_id: self.reader_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            borrowed_count: self.borrowed_count(),
            max_books: self.max_books,
            outstanding_fines: self.fines,
            is_active: self.is_active,
            membership_date: self.membership_date.format("%Y-%m-%d").to_string(),
        }
    }
}

fn generate_reader_id() -> PatronId {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("RDR-{}", hex[..8].to_uppercase())
}

/// Whole late days between `due` and `now`, rounding any started day up.
fn overdue_days(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    let late_seconds = (now - due).num_seconds();
    if late_seconds <= 0 {
        0
    } else {
        (late_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    }
}
