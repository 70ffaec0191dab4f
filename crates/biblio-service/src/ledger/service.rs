//! Loan service — the transactional core of the circulation ledger.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use biblio_core::config::circulation::CirculationConfig;
use biblio_core::error::AppError;
use biblio_core::result::AppResult;
use biblio_core::traits::Clock;
use biblio_core::types::id::{BookId, LoanId, UserId};
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::audit::{AuditAction, AuditEntityType};
use biblio_entity::loan::Loan;
use biblio_store::MemoryStore;
use biblio_store::repositories::{BookRepository, LoanRepository, UserRepository};

use crate::audit::record::{encode_details, record};
use crate::context::RequestContext;
use crate::ledger::fine;
use crate::query::views::{LoanDetail, OverdueLoan};

/// Audit payload for a created loan.
#[derive(Debug, Serialize)]
struct LoanCreatedDetails<'a> {
    book_id: BookId,
    book_title: &'a str,
    username: &'a str,
    due_date: DateTime<Utc>,
    available_copies: u32,
}

/// Audit payload for a returned loan.
#[derive(Debug, Serialize)]
struct LoanReturnedDetails<'a> {
    book_id: BookId,
    book_title: &'a str,
    fine: f64,
    days_overdue: i64,
    available_copies: u32,
}

/// Orchestrates loan creation and return across catalog and membership
/// state.
///
/// Each mutation runs as a single store transaction: the loan row, the
/// copy counter, and the audit entries commit together or not at all.
#[derive(Debug, Clone)]
pub struct LoanService {
    /// Transactional store.
    store: Arc<MemoryStore>,
    /// Loan repository (read side).
    loan_repo: Arc<LoanRepository>,
    /// User repository, for read-side joins.
    user_repo: Arc<UserRepository>,
    /// Book repository, for read-side joins.
    book_repo: Arc<BookRepository>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Loan policy.
    policy: CirculationConfig,
}

impl LoanService {
    /// Creates a new loan service.
    pub fn new(
        store: Arc<MemoryStore>,
        loan_repo: Arc<LoanRepository>,
        user_repo: Arc<UserRepository>,
        book_repo: Arc<BookRepository>,
        clock: Arc<dyn Clock>,
        policy: CirculationConfig,
    ) -> Self {
        Self {
            store,
            loan_repo,
            user_repo,
            book_repo,
            clock,
            policy,
        }
    }

    /// Lend one copy of a book to a user.
    ///
    /// Validates the borrower's loan cap and the book's availability, then
    /// atomically inserts the loan, decrements the copy counter, and
    /// appends the `loan_created` audit entry.
    pub async fn create_loan(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        book_id: BookId,
    ) -> AppResult<Loan> {
        let now = self.clock.now();
        let policy = self.policy.clone();

        let loan = self
            .store
            .transaction(|tx| {
                let user = tx
                    .user(user_id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
                let mut book = tx
                    .book(book_id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Book {book_id} not found")))?;

                let active_loans = tx.count_active_loans(user_id);
                if active_loans >= policy.max_active_loans {
                    return Err(AppError::loan_limit_exceeded(format!(
                        "'{}' has {active_loans} active loans (limit {})",
                        user.username, policy.max_active_loans
                    ))
                    .with_details(json!({
                        "active_loans": active_loans,
                        "limit": policy.max_active_loans,
                    })));
                }

                if !book.try_reserve_copy() {
                    return Err(AppError::no_copies_available(format!(
                        "No copies of '{}' are available",
                        book.title
                    ))
                    .with_details(json!({
                        "book_id": book.id,
                        "total_copies": book.total_copies,
                        "available_copies": book.available_copies,
                    })));
                }
                tx.put_book(book.clone());

                let loan = Loan {
                    id: LoanId::new(),
                    user_id,
                    book_id,
                    loan_date: now,
                    due_date: now + Duration::days(policy.loan_period_days),
                    return_date: None,
                    fine: 0.0,
                };
                tx.put_loan(loan.clone());

                let details = encode_details(&LoanCreatedDetails {
                    book_id,
                    book_title: &book.title,
                    username: &user.username,
                    due_date: loan.due_date,
                    available_copies: book.available_copies,
                });
                record(
                    tx,
                    now,
                    AuditAction::LoanCreated,
                    AuditEntityType::Loan,
                    loan.id.into_uuid(),
                    Some(user_id),
                    Some(details),
                    ctx.source_address.clone(),
                );

                Ok(loan)
            })
            .await?;

        info!(
            loan_id = %loan.id,
            user_id = %user_id,
            book_id = %book_id,
            due_date = %loan.due_date,
            "Loan created"
        );
        Ok(loan)
    }

    /// Return a loan, finalizing any overdue fine.
    ///
    /// Idempotency guard: a loan already returned is rejected, and the copy
    /// counter increments exactly once. Emits `loan_returned`, plus
    /// `fine_calculated` when a fine accrued.
    pub async fn return_loan(&self, ctx: &RequestContext, loan_id: LoanId) -> AppResult<Loan> {
        let now = self.clock.now();
        let policy = self.policy.clone();

        let loan = self
            .store
            .transaction(|tx| {
                let mut loan = tx
                    .loan(loan_id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Loan {loan_id} not found")))?;
                if loan.return_date.is_some() {
                    return Err(AppError::already_returned(format!(
                        "Loan {loan_id} has already been returned"
                    )));
                }

                // Books are never deleted while referenced; the lookup is a
                // guard against a corrupted reference, not a normal path.
                let mut book = tx.book(loan.book_id).cloned().ok_or_else(|| {
                    AppError::not_found(format!("Book {} not found", loan.book_id))
                })?;

                loan.return_date = Some(now);
                let days_overdue = fine::days_overdue(loan.due_date, now);
                loan.fine = fine::accrued_fine(&policy, loan.due_date, now);

                if !book.release_copy() {
                    warn!(
                        book_id = %book.id,
                        total_copies = book.total_copies,
                        "Copy release clipped at total_copies"
                    );
                }
                tx.put_book(book.clone());
                tx.put_loan(loan.clone());

                let details = encode_details(&LoanReturnedDetails {
                    book_id: book.id,
                    book_title: &book.title,
                    fine: loan.fine,
                    days_overdue,
                    available_copies: book.available_copies,
                });
                record(
                    tx,
                    now,
                    AuditAction::LoanReturned,
                    AuditEntityType::Loan,
                    loan.id.into_uuid(),
                    Some(loan.user_id),
                    Some(details),
                    ctx.source_address.clone(),
                );

                if loan.fine > 0.0 {
                    record(
                        tx,
                        now,
                        AuditAction::FineCalculated,
                        AuditEntityType::Loan,
                        loan.id.into_uuid(),
                        Some(loan.user_id),
                        Some(json!({
                            "fine": loan.fine,
                            "days_overdue": days_overdue,
                            "fine_per_day": policy.fine_per_day,
                            "fine_cap": policy.fine_cap,
                        })),
                        ctx.source_address.clone(),
                    );
                }

                Ok(loan)
            })
            .await?;

        info!(
            loan_id = %loan.id,
            fine = loan.fine,
            "Loan returned"
        );
        Ok(loan)
    }

    /// A loan joined with its borrower and book, plus live overdue figures.
    ///
    /// Read-only; tolerates the user or book having been removed.
    pub async fn get_loan_detail(&self, loan_id: LoanId) -> AppResult<LoanDetail> {
        let loan = self
            .loan_repo
            .find_by_id(loan_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Loan {loan_id} not found")))?;

        let user = self.user_repo.find_by_id(loan.user_id).await;
        let book = self.book_repo.find_by_id(loan.book_id).await;
        let now = self.clock.now();

        Ok(LoanDetail::build(&self.policy, loan, user, book, now))
    }

    /// All active loans past their due date, annotated with live figures.
    ///
    /// Read-only and side-effect free; safe to call at arbitrary frequency.
    pub async fn list_overdue(&self) -> Vec<OverdueLoan> {
        let now = self.clock.now();
        self.loan_repo
            .find_overdue(now)
            .await
            .into_iter()
            .map(|loan| OverdueLoan::build(&self.policy, loan, now))
            .collect()
    }

    /// List loans with pagination, newest first.
    pub async fn list_loans(&self, page: &PageRequest) -> PageResponse<Loan> {
        self.loan_repo.find_all(page).await
    }
}
