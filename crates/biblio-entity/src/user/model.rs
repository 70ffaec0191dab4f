//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use biblio_core::types::id::UserId;

use super::role::UserRole;

/// A registered borrower.
///
/// Users are immutable after creation; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number (unique).
    pub phone: String,
    /// User role.
    pub role: UserRole,
    /// When the user was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Desired username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Phone number.
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    /// Role; defaults to `patron` when omitted.
    #[serde(default)]
    pub role: Option<UserRole>,
}
