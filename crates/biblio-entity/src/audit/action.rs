//! Audit action and entity-type vocabularies.
//!
//! These identifiers are stable; downstream reporting consumes the wire
//! strings, so renaming a variant is a breaking change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The action an audit entry documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A user was registered.
    UserCreated,
    /// A book was added to the catalog.
    BookCreated,
    /// A book's copy counters were resized.
    BookUpdated,
    /// A loan was created.
    LoanCreated,
    /// A loan was returned.
    LoanReturned,
    /// An overdue fine was finalized.
    FineCalculated,
}

impl AuditAction {
    /// Return the action as its stable wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user_created",
            Self::BookCreated => "book_created",
            Self::BookUpdated => "book_updated",
            Self::LoanCreated => "loan_created",
            Self::LoanReturned => "loan_returned",
            Self::FineCalculated => "fine_calculated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = biblio_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_created" => Ok(Self::UserCreated),
            "book_created" => Ok(Self::BookCreated),
            "book_updated" => Ok(Self::BookUpdated),
            "loan_created" => Ok(Self::LoanCreated),
            "loan_returned" => Ok(Self::LoanReturned),
            "fine_calculated" => Ok(Self::FineCalculated),
            _ => Err(biblio_core::AppError::validation(format!(
                "Unknown audit action: '{s}'"
            ))),
        }
    }
}

/// The kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntityType {
    /// A registered user.
    User,
    /// A catalog book.
    Book,
    /// A loan.
    Loan,
}

impl AuditEntityType {
    /// Return the entity type as its stable wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Book => "book",
            Self::Loan => "loan",
        }
    }
}

impl fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
