//! Loan entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use biblio_core::types::id::{BookId, LoanId, UserId};

/// Lifecycle state of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Out with the borrower.
    Active,
    /// Returned; terminal.
    Returned,
}

/// One borrow event for one copy of a book.
///
/// A loan is created `Active` and becomes `Returned` exactly once; the fine
/// is finalized at return time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique loan identifier.
    pub id: LoanId,
    /// The borrower.
    pub user_id: UserId,
    /// The borrowed book.
    pub book_id: BookId,
    /// When the loan was created.
    pub loan_date: DateTime<Utc>,
    /// When the copy is due back.
    pub due_date: DateTime<Utc>,
    /// When the copy came back; `None` while active.
    pub return_date: Option<DateTime<Utc>>,
    /// Finalized fine; 0 until return.
    pub fine: f64,
}

impl Loan {
    /// Whether the copy is still out.
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Lifecycle state.
    pub fn status(&self) -> LoanStatus {
        if self.is_active() {
            LoanStatus::Active
        } else {
            LoanStatus::Returned
        }
    }

    /// Whether the loan is (or was returned) past its due date.
    ///
    /// For active loans this is evaluated against `at`; for returned loans
    /// against the actual return date.
    pub fn is_overdue(&self, at: DateTime<Utc>) -> bool {
        match self.return_date {
            None => at > self.due_date,
            Some(returned) => returned > self.due_date,
        }
    }
}
