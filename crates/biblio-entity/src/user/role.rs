//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to registered users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular borrower.
    Patron,
    /// Library staff; may administer the catalog.
    Librarian,
}

impl UserRole {
    /// Check if this role is library staff.
    pub fn is_librarian(&self) -> bool {
        matches!(self, Self::Librarian)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patron => "patron",
            Self::Librarian => "librarian",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Patron
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = biblio_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patron" => Ok(Self::Patron),
            "librarian" => Ok(Self::Librarian),
            _ => Err(biblio_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: patron, librarian"
            ))),
        }
    }
}
