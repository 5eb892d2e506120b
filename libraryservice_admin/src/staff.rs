use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use libraryservice_catalog::title::Title;
use libraryservice_circulation::patron::Patron;

use crate::api::{Report, Shift, StaffSummary};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdminError {
    #[error("Admin access required")]
    AdminAccessRequired,

    #[error("Borrow limit must be positive")]
    InvalidLimit,

    #[error("Unknown access level: {0}")]
    UnknownAccessLevel(String),

    #[error("Unknown report type: {0}")]
    UnknownReportType(String),
}

/// Staff permission level. Parsed case-insensitively, rendered lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Standard,
    Admin,
}

impl FromStr for AccessLevel {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "admin" => Ok(Self::Admin),
            other => Err(AdminError::UnknownAccessLevel(other.to_string())),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Account operations a staff member can apply to a patron. Suspending,
/// activating and adjusting the borrow limit need no elevation; waiving
/// fines is admin only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    Suspend,
    Activate,
    UpdateLimit { new_limit: usize },
    WaiveFine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Borrowing,
    Fines,
    PopularBooks,
}

impl ReportKind {
    fn report_title(self) -> &'static str {
        match self {
            Self::Borrowing => "Borrowing Activity Report",
            Self::Fines => "Outstanding Fines Report",
            Self::PopularBooks => "Popular Books Report",
        }
    }
}

impl FromStr for ReportKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "borrowing" => Ok(Self::Borrowing),
            "fines" => Ok(Self::Fines),
            "popular_books" => Ok(Self::PopularBooks),
            other => Err(AdminError::UnknownReportType(other.to_string())),
        }
    }
}

/// A permission-leveled operator. Holds no catalog or patron state of its
/// own; every operation mutates the Title or Patron passed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffActor {
    employee_id: String,
    name: String,
    email: String,
    access_level: AccessLevel,
    shift_schedule: HashMap<String, Shift>,
}

impl StaffActor {
    pub fn new(
        name: impl Into<String>,
        employee_id: impl Into<String>,
        email: impl Into<String>,
        access_level: AccessLevel,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            email: email.into(),
            access_level,
            shift_schedule: HashMap::new(),
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Approves adding `title` to the catalog and logs the addition. Any
    /// access level may register; the caller performs the actual store
    /// insertion.
    pub fn register_title(&self, title: &Title) -> Result<(), AdminError> {
        tracing::info!(
            staff = %self.name,
            isbn = %title.isbn(),
            title = %title.title(),
            "registered title"
        );
        Ok(())
    }

    /// Approves removing the title with `isbn` from the catalog. Admin
    /// only; the caller performs the actual store removal.
    pub fn deregister_title(&self, isbn: &str) -> Result<(), AdminError> {
        if self.access_level != AccessLevel::Admin {
            tracing::warn!(staff = %self.name, %isbn, "deregister denied");
            return Err(AdminError::AdminAccessRequired);
        }
        tracing::info!(staff = %self.name, %isbn, "deregistered title");
        Ok(())
    }

    /// Applies an account action to `patron`. Denied actions leave the
    /// patron untouched.
    pub fn manage_account(
        &self,
        patron: &mut Patron,
        action: AccountAction,
    ) -> Result<(), AdminError> {
        match action {
            AccountAction::Suspend => {
                patron.suspend();
                tracing::info!(staff = %self.name, patron = %patron.name(), "account suspended");
                Ok(())
            }
            AccountAction::Activate => {
                patron.activate();
                tracing::info!(staff = %self.name, patron = %patron.name(), "account activated");
                Ok(())
            }
            AccountAction::UpdateLimit { new_limit } => {
                if new_limit == 0 {
                    return Err(AdminError::InvalidLimit);
                }
                patron.set_max_books(new_limit);
                tracing::info!(
                    staff = %self.name,
                    patron = %patron.name(),
                    new_limit,
                    "borrow limit updated"
                );
                Ok(())
            }
            AccountAction::WaiveFine => {
                if self.access_level != AccessLevel::Admin {
                    tracing::warn!(
                        staff = %self.name,
                        patron = %patron.name(),
                        "fine waiver denied"
                    );
                    return Err(AdminError::AdminAccessRequired);
                }
                patron.clear_fines();
                tracing::info!(staff = %self.name, patron = %patron.name(), "fines waived");
                Ok(())
            }
        }
    }

    /// Upserts the shift for `day`; the last write per day wins.
    pub fn set_shift(&mut self, day: &str, start: &str, end: &str) {
        self.shift_schedule.insert(
            day.to_string(),
            Shift {
                start: start.to_string(),
                end: end.to_string(),
            },
        );
    }

    pub fn shift(&self, day: &str) -> Option<&Shift> {
        self.shift_schedule.get(day)
    }

    /// Produces the report skeleton for `kind`; content generation is the
    /// reporting pipeline's concern.
    pub fn generate_report(&self, kind: ReportKind) -> Report {
        tracing::info!(staff = %self.name, ?kind, "generating report");
        Report {
            title: kind.report_title().to_string(),
            data: serde_json::json!({}),
        }
    }

    pub fn summary(&self) -> StaffSummary {
        StaffSummary {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            access_level: self.access_level.to_string(),
            shift_schedule: self.shift_schedule.clone(),
        }
    }
}
