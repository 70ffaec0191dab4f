//! Composite read DTOs.
//!
//! Built by joining entities on the read path; constructing a view never
//! mutates stored state. Fine amounts on active loans are live previews
//! computed with the same formula that finalizes them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use biblio_core::config::circulation::CirculationConfig;
use biblio_core::types::id::{BookId, UserId};
use biblio_entity::book::Book;
use biblio_entity::loan::Loan;
use biblio_entity::user::{User, UserRole};

use crate::ledger::fine;

/// User fields embedded in a loan view.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Book fields embedded in a loan view.
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    /// Book id.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// ISBN.
    pub isbn: String,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
        }
    }
}

/// A loan joined with its borrower and book, plus live overdue figures.
///
/// The sub-objects are `None` when the referenced row is gone; the view
/// stays usable either way.
#[derive(Debug, Clone, Serialize)]
pub struct LoanDetail {
    /// The loan row.
    pub loan: Loan,
    /// The borrower, if still present.
    pub user: Option<UserSummary>,
    /// The book, if still present.
    pub book: Option<BookSummary>,
    /// Whether the loan is past due (active) or was returned late.
    pub is_overdue: bool,
    /// Whole days overdue at the reference time.
    pub days_overdue: i64,
    /// Finalized fine when returned, live preview when active.
    pub current_fine: f64,
}

impl LoanDetail {
    /// Build the view for `loan` as of `now`.
    pub fn build(
        policy: &CirculationConfig,
        loan: Loan,
        user: Option<User>,
        book: Option<Book>,
        now: DateTime<Utc>,
    ) -> Self {
        let reference = loan.return_date.unwrap_or(now);
        let days_overdue = fine::days_overdue(loan.due_date, reference);
        let current_fine = match loan.return_date {
            Some(_) => loan.fine,
            None => fine::accrued_fine(policy, loan.due_date, now),
        };
        Self {
            is_overdue: loan.is_overdue(now),
            days_overdue,
            current_fine,
            user: user.map(UserSummary::from),
            book: book.map(BookSummary::from),
            loan,
        }
    }
}

/// An overdue active loan with its live figures.
#[derive(Debug, Clone, Serialize)]
pub struct OverdueLoan {
    /// The loan row.
    pub loan: Loan,
    /// Whole days past due as of the listing time.
    pub days_overdue: i64,
    /// Fine the borrower would owe if the loan were returned now.
    pub potential_fine: f64,
}

impl OverdueLoan {
    /// Annotate an active loan as of `now`.
    pub fn build(policy: &CirculationConfig, loan: Loan, now: DateTime<Utc>) -> Self {
        Self {
            days_overdue: fine::days_overdue(loan.due_date, now),
            potential_fine: fine::accrued_fine(policy, loan.due_date, now),
            loan,
        }
    }
}

/// Loan-history counts for one book.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoanStats {
    /// Loans ever taken.
    pub total: usize,
    /// Currently active loans.
    pub active: usize,
    /// Returned loans.
    pub completed: usize,
}

/// A book with its derived circulation figures.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    /// The book row.
    pub book: Book,
    /// Copies currently out.
    pub copies_on_loan: u32,
    /// Loan-history counts.
    pub loan_stats: LoanStats,
}

/// One of a user's active loans with its live overdue preview.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveLoanPreview {
    /// The loan row.
    pub loan: Loan,
    /// Whether it is past due.
    pub is_overdue: bool,
    /// Whole days past due.
    pub days_overdue: i64,
    /// Fine owed if returned now.
    pub potential_fine: f64,
}

impl ActiveLoanPreview {
    /// Annotate an active loan as of `now`.
    pub fn build(policy: &CirculationConfig, loan: Loan, now: DateTime<Utc>) -> Self {
        Self {
            is_overdue: loan.is_overdue(now),
            days_overdue: fine::days_overdue(loan.due_date, now),
            potential_fine: fine::accrued_fine(policy, loan.due_date, now),
            loan,
        }
    }
}

/// A user with their active loans and summed potential fines.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    /// The user row.
    pub user: User,
    /// Active loans, each with a live preview.
    pub active_loans: Vec<ActiveLoanPreview>,
    /// Sum of the potential fines across active loans.
    pub total_potential_fines: f64,
}
