//! Membership service — owns user records and per-user loan accounting.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use biblio_core::error::AppError;
use biblio_core::result::AppResult;
use biblio_core::traits::Clock;
use biblio_core::types::id::UserId;
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::audit::{AuditAction, AuditEntityType};
use biblio_entity::user::{CreateUser, User};
use biblio_store::MemoryStore;
use biblio_store::repositories::{LoanRepository, UserRepository};

use crate::audit::record::record;
use crate::context::RequestContext;

/// Handles user registration and lookups.
#[derive(Debug, Clone)]
pub struct MembershipService {
    /// Transactional store.
    store: Arc<MemoryStore>,
    /// User repository (read side).
    user_repo: Arc<UserRepository>,
    /// Loan repository, for active-loan counts.
    loan_repo: Arc<LoanRepository>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(
        store: Arc<MemoryStore>,
        user_repo: Arc<UserRepository>,
        loan_repo: Arc<LoanRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            user_repo,
            loan_repo,
            clock,
        }
    }

    /// Register a new user.
    ///
    /// Username, email, and phone must each be unique; the role defaults
    /// to `patron`. Users are immutable once created.
    pub async fn create_user(&self, ctx: &RequestContext, req: CreateUser) -> AppResult<User> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let username = req.username.trim().to_string();
        let email = req.email.trim().to_string();
        let phone = req.phone.trim().to_string();
        if username.is_empty() || phone.is_empty() {
            return Err(AppError::validation(
                "Username and phone must not be blank",
            ));
        }

        let role = req.role.unwrap_or_default();
        let now = self.clock.now();
        let user = self
            .store
            .transaction(|tx| {
                if tx.username_exists(&username) {
                    return Err(AppError::conflict(format!(
                        "Username '{username}' is already taken"
                    )));
                }
                if tx.email_exists(&email) {
                    return Err(AppError::conflict(format!(
                        "Email '{email}' is already registered"
                    )));
                }
                if tx.phone_exists(&phone) {
                    return Err(AppError::conflict(format!(
                        "Phone number '{phone}' is already registered"
                    )));
                }

                let user = User {
                    id: UserId::new(),
                    username: username.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    role,
                    created_at: now,
                };
                tx.put_user(user.clone());

                record(
                    tx,
                    now,
                    AuditAction::UserCreated,
                    AuditEntityType::User,
                    user.id.into_uuid(),
                    ctx.actor_id,
                    Some(json!({
                        "username": user.username,
                        "role": user.role,
                    })),
                    ctx.source_address.clone(),
                );

                Ok(user)
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Fetch a user by id.
    pub async fn lookup_user(&self, user_id: UserId) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Snapshot count of the user's active loans.
    ///
    /// Advisory for display; the loan-creation transaction re-checks the
    /// cap under its own lock.
    pub async fn count_active_loans(&self, user_id: UserId) -> usize {
        self.loan_repo.count_active_by_user(user_id).await
    }

    /// List registered users with pagination.
    pub async fn list_users(&self, page: &PageRequest) -> PageResponse<User> {
        self.user_repo.find_all(page).await
    }
}
