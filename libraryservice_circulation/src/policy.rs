use std::env;

pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;
pub const DEFAULT_DAILY_FINE: f64 = 0.50;
pub const DEFAULT_MAX_BOOKS: usize = 5;

/// Lending parameters shared by every loan: how long a copy stays out,
/// what a late day costs, and the borrow limit assigned to new patrons.
#[derive(Debug, Clone, PartialEq)]
pub struct LendingPolicy {
    pub loan_period_days: i64,
    pub daily_fine: f64,
    pub max_books: usize,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            daily_fine: DEFAULT_DAILY_FINE,
            max_books: DEFAULT_MAX_BOOKS,
        }
    }
}

impl LendingPolicy {
    /// Builds a policy from `LOAN_PERIOD_DAYS`, `DAILY_FINE` and
    /// `MAX_BOOKS` environment variables, falling back to the defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            loan_period_days: parse_env("LOAN_PERIOD_DAYS", DEFAULT_LOAN_PERIOD_DAYS),
            daily_fine: parse_env("DAILY_FINE", DEFAULT_DAILY_FINE),
            max_books: parse_env("MAX_BOOKS", DEFAULT_MAX_BOOKS),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
