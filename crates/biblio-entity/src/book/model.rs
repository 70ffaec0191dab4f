//! Book entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use biblio_core::types::id::BookId;

/// A book title in the catalog, with its copy counters.
///
/// Counters are unsigned, so `available_copies` can never go negative;
/// `available_copies <= total_copies` is maintained by the mutation
/// methods below together with the store's write serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// ISBN (unique across the catalog).
    pub isbn: String,
    /// Total lendable copies owned.
    pub total_copies: u32,
    /// Copies currently on the shelf.
    pub available_copies: u32,
}

impl Book {
    /// Number of copies currently out on loan.
    pub fn copies_on_loan(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// Atomically claim one available copy.
    ///
    /// Returns `false` without mutating when no copy is available. This is
    /// the single choke point preventing over-lending; callers must invoke
    /// it inside a store transaction.
    pub fn try_reserve_copy(&mut self) -> bool {
        if self.available_copies > 0 {
            self.available_copies -= 1;
            true
        } else {
            false
        }
    }

    /// Put one copy back on the shelf.
    ///
    /// Returns `false` when the counter was already at `total_copies` and
    /// the increment was clipped.
    pub fn release_copy(&mut self) -> bool {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
            true
        } else {
            false
        }
    }
}

/// Data required to add a book to the catalog.
///
/// New books start with a single copy; use the resize operation to grow
/// the holding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBook {
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Author.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// ISBN.
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
}
