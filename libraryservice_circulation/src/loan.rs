use chrono::{DateTime, Duration, Utc};

use libraryservice_catalog::title::{Title, TitleError};

use crate::patron::{Patron, PatronError};
use crate::policy::LendingPolicy;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoanError {
    #[error(transparent)]
    Title(#[from] TitleError),

    #[error(transparent)]
    Patron(#[from] PatronError),
}

/// Performs both halves of a borrow: the title records the loan, the
/// patron records the ledger entry. If the patron half fails the title
/// half is rolled back, so a failed check-out leaves both entities
/// untouched. Returns the due date on success.
///
/// Both halves see the same `now`, keeping the title's due date equal to
/// the patron's borrow date plus the policy's loan period.
pub fn check_out(
    title: &mut Title,
    patron: &mut Patron,
    policy: &LendingPolicy,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, LoanError> {
    let patron_id = patron.reader_id().to_string();
    let isbn = title.isbn().to_string();

    title.lend(&patron_id, now, policy.loan_period_days)?;

    if let Err(patron_half) = patron.borrow(&isbn, now) {
        title.accept_return(&patron_id)?;
        return Err(patron_half.into());
    }

    let due = now + Duration::days(policy.loan_period_days);
    tracing::info!(%isbn, %patron_id, %due, "checked out");
    Ok(due)
}

/// Performs both halves of a return and reports the fine accrued.
///
/// The title's loan record is verified first, so the fallible patron
/// half (which accrues the late fine) runs before the then-infallible
/// title half; a failed check-in leaves both entities untouched.
pub fn check_in(
    title: &mut Title,
    patron: &mut Patron,
    policy: &LendingPolicy,
    now: DateTime<Utc>,
) -> Result<f64, LoanError> {
    let patron_id = patron.reader_id().to_string();
    let isbn = title.isbn().to_string();

    if title.due_date(&patron_id).is_none() {
        return Err(TitleError::NotLentTo {
            isbn,
            patron_id,
        }
        .into());
    }

    let fine = patron.return_book(&isbn, now, policy)?;
    title.accept_return(&patron_id)?;

    if fine > 0.0 {
        tracing::info!(%isbn, %patron_id, fine, "checked in late");
    } else {
        tracing::info!(%isbn, %patron_id, "checked in");
    }
    Ok(fine)
}

#[cfg(test)]
mod loan_tests {
    use chrono::TimeZone;

    use crate::clock::{Clock, FixedClock};

    use super::*;

    fn day_zero() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn title() -> Title {
        Title::new("978-0", "Title0", "Author0", 1999, "Fiction", 2)
    }

    fn patron(clock: &FixedClock) -> Patron {
        Patron::with_id("RDR-TEST0001", "Alice", "alice@example.com", clock.now())
    }

    #[test]
    /// Round trip through both entities
    /// 1. Check out - both sides record the loan, due dates agree
    /// 2. Check in on time - both sides cleared, no fine
    fn test_check_out_and_in_round_trip() {
        let clock = FixedClock(day_zero());
        let policy = LendingPolicy::default();
        let mut title = title();
        let mut patron = patron(&clock);

        let due = check_out(&mut title, &mut patron, &policy, clock.now())
            .expect("Failed to check out");

        assert_eq!(title.available_copies(), 1);
        assert_eq!(title.due_date(patron.reader_id()), Some(due));
        assert_eq!(patron.borrow_date(title.isbn()), Some(clock.now()));
        assert_eq!(
            due,
            clock.now() + Duration::days(policy.loan_period_days)
        );

        let fine = check_in(&mut title, &mut patron, &policy, due)
            .expect("Failed to check in");
        assert_eq!(fine, 0.0);
        assert_eq!(title.available_copies(), 2);
        assert_eq!(title.due_date(patron.reader_id()), None);
        assert_eq!(patron.borrowed_count(), 0);
        assert_eq!(patron.fines(), 0.0);
    }

    #[test]
    /// A late check-in accrues the fine on the patron and frees the copy
    fn test_late_check_in_accrues_fine() {
        let clock = FixedClock(day_zero());
        let policy = LendingPolicy::default();
        let mut title = title();
        let mut patron = patron(&clock);

        let due = check_out(&mut title, &mut patron, &policy, clock.now())
            .expect("Failed to check out");
        assert!(title.is_overdue(patron.reader_id(), due + Duration::days(3)));

        let fine = check_in(&mut title, &mut patron, &policy, due + Duration::days(3))
            .expect("Failed to check in");
        assert_eq!(fine, 1.50);
        assert_eq!(patron.fines(), 1.50);
        assert_eq!(title.available_copies(), 2);
    }

    #[test]
    /// When the patron half fails the title half is rolled back
    fn test_check_out_rollback_on_patron_failure() {
        let clock = FixedClock(day_zero());
        let policy = LendingPolicy::default();
        let mut title = title();
        let mut patron = patron(&clock);
        patron.suspend();

        let result = check_out(&mut title, &mut patron, &policy, clock.now());
        assert!(matches!(
            result,
            Err(LoanError::Patron(PatronError::MembershipSuspended))
        ));

        // No partial mutation on either side
        assert_eq!(title.available_copies(), 2);
        assert_eq!(title.borrower_count(), 0);
        assert_eq!(patron.borrowed_count(), 0);
    }

    #[test]
    /// Check-in of a loan the title does not know about fails cleanly
    fn test_check_in_without_loan() {
        let clock = FixedClock(day_zero());
        let policy = LendingPolicy::default();
        let mut title = title();
        let mut patron = patron(&clock);

        let result = check_in(&mut title, &mut patron, &policy, clock.now());
        assert!(matches!(
            result,
            Err(LoanError::Title(TitleError::NotLentTo { .. }))
        ));
        assert_eq!(title.available_copies(), 2);
        assert_eq!(patron.fines(), 0.0);
    }

    #[test]
    /// Two patrons drain a two copy title through the orchestration
    fn test_two_patrons_share_inventory() {
        let clock = FixedClock(day_zero());
        let policy = LendingPolicy::default();
        let mut title = title();
        let mut alice = Patron::with_id("RDR-A", "Alice", "a@example.com", clock.now());
        let mut bob = Patron::with_id("RDR-B", "Bob", "b@example.com", clock.now());

        check_out(&mut title, &mut alice, &policy, clock.now()).expect("Failed to check out");
        check_out(&mut title, &mut bob, &policy, clock.now()).expect("Failed to check out");
        assert!(!title.is_available());

        let third = check_out(
            &mut title,
            &mut Patron::with_id("RDR-C", "Eve", "e@example.com", clock.now()),
            &policy,
            clock.now(),
        );
        assert!(matches!(
            third,
            Err(LoanError::Title(TitleError::NoCopyAvailable(..)))
        ));

        check_in(&mut title, &mut alice, &policy, clock.now()).expect("Failed to check in");
        assert!(title.is_available());
        assert_eq!(title.borrower_count(), 1);
    }
}
