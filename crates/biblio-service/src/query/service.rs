//! Query façade — composite read-only views.

use std::sync::Arc;

use biblio_core::config::circulation::CirculationConfig;
use biblio_core::error::AppError;
use biblio_core::result::AppResult;
use biblio_core::traits::Clock;
use biblio_core::types::id::{BookId, UserId};
use biblio_store::repositories::{BookRepository, LoanRepository, UserRepository};

use super::views::{ActiveLoanPreview, BookDetail, LoanStats, UserDetail};

/// Builds composite views by joining repositories; never mutates state.
#[derive(Debug, Clone)]
pub struct QueryService {
    /// Book repository.
    book_repo: Arc<BookRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Loan repository.
    loan_repo: Arc<LoanRepository>,
    /// Time source for live previews.
    clock: Arc<dyn Clock>,
    /// Loan policy for fine previews.
    policy: CirculationConfig,
}

impl QueryService {
    /// Creates a new query service.
    pub fn new(
        book_repo: Arc<BookRepository>,
        user_repo: Arc<UserRepository>,
        loan_repo: Arc<LoanRepository>,
        clock: Arc<dyn Clock>,
        policy: CirculationConfig,
    ) -> Self {
        Self {
            book_repo,
            user_repo,
            loan_repo,
            clock,
            policy,
        }
    }

    /// A book with its copies-on-loan figure and loan-history counts.
    pub async fn get_book_detail(&self, book_id: BookId) -> AppResult<BookDetail> {
        let book = self
            .book_repo
            .find_by_id(book_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Book {book_id} not found")))?;

        let loans = self.loan_repo.find_by_book(book_id).await;
        let active = loans.iter().filter(|l| l.is_active()).count();
        let loan_stats = LoanStats {
            total: loans.len(),
            active,
            completed: loans.len() - active,
        };

        Ok(BookDetail {
            copies_on_loan: book.copies_on_loan(),
            book,
            loan_stats,
        })
    }

    /// A user with their active loans and the summed potential fines.
    pub async fn get_user_detail(&self, user_id: UserId) -> AppResult<UserDetail> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        let now = self.clock.now();
        let active_loans: Vec<ActiveLoanPreview> = self
            .loan_repo
            .find_active_by_user(user_id)
            .await
            .into_iter()
            .map(|loan| ActiveLoanPreview::build(&self.policy, loan, now))
            .collect();
        let total_potential_fines = active_loans.iter().map(|l| l.potential_fine).sum();

        Ok(UserDetail {
            user,
            active_loans,
            total_potential_fines,
        })
    }
}
