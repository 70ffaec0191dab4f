//! Loan repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use biblio_core::types::id::{BookId, LoanId, UserId};
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::loan::Loan;

use crate::memory::MemoryStore;

/// Read access to loan rows.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    store: Arc<MemoryStore>,
}

impl LoanRepository {
    /// Create a new loan repository.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Find a loan by primary key.
    pub async fn find_by_id(&self, id: LoanId) -> Option<Loan> {
        self.store.read(|t| t.loans.get(&id).cloned()).await
    }

    /// The user's currently active loans, ordered by due date.
    pub async fn find_active_by_user(&self, user_id: UserId) -> Vec<Loan> {
        self.store
            .read(|t| {
                let mut loans: Vec<Loan> = t
                    .loans
                    .values()
                    .filter(|l| l.user_id == user_id && l.is_active())
                    .cloned()
                    .collect();
                loans.sort_by_key(|l| l.due_date);
                loans
            })
            .await
    }

    /// Snapshot count of the user's active loans.
    ///
    /// Advisory only: the loan-creation transaction re-counts under its
    /// write lock before inserting.
    pub async fn count_active_by_user(&self, user_id: UserId) -> usize {
        self.store
            .read(|t| {
                t.loans
                    .values()
                    .filter(|l| l.user_id == user_id && l.is_active())
                    .count()
            })
            .await
    }

    /// Every loan ever taken on a book, newest first.
    pub async fn find_by_book(&self, book_id: BookId) -> Vec<Loan> {
        self.store
            .read(|t| {
                let mut loans: Vec<Loan> = t
                    .loans
                    .values()
                    .filter(|l| l.book_id == book_id)
                    .cloned()
                    .collect();
                loans.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));
                loans
            })
            .await
    }

    /// Active loans whose due date has passed, oldest due date first.
    pub async fn find_overdue(&self, now: DateTime<Utc>) -> Vec<Loan> {
        self.store
            .read(|t| {
                let mut loans: Vec<Loan> = t
                    .loans
                    .values()
                    .filter(|l| l.is_active() && l.due_date < now)
                    .cloned()
                    .collect();
                loans.sort_by_key(|l| l.due_date);
                loans
            })
            .await
    }

    /// List loans with pagination, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> PageResponse<Loan> {
        self.store
            .read(|t| {
                let mut loans: Vec<Loan> = t.loans.values().cloned().collect();
                loans.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));
                let total = loans.len() as u64;
                let items = loans
                    .into_iter()
                    .skip(page.offset() as usize)
                    .take(page.limit() as usize)
                    .collect();
                PageResponse::new(items, page.page, page.page_size, total)
            })
            .await
    }
}
