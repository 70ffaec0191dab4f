//! In-memory table set behind a single async lock.

use std::collections::HashMap;

use tokio::sync::RwLock;

use biblio_core::AppResult;
use biblio_core::types::id::{BookId, LoanId, UserId};
use biblio_entity::audit::AuditLogEntry;
use biblio_entity::book::Book;
use biblio_entity::loan::Loan;
use biblio_entity::user::User;

use crate::transaction::Transaction;

/// All stored rows.
///
/// The audit log is an append-only vector in insertion order; every other
/// table is keyed by its typed id.
#[derive(Debug, Default)]
pub struct Tables {
    /// Book rows, owned by the catalog.
    pub books: HashMap<BookId, Book>,
    /// User rows, owned by membership.
    pub users: HashMap<UserId, User>,
    /// Loan rows, owned by the ledger.
    pub loans: HashMap<LoanId, Loan>,
    /// Append-only audit trail.
    pub audit_log: Vec<AuditLogEntry>,
}

/// Single-node transactional store.
///
/// Writers are serialized: a transaction holds the write lock for the
/// duration of its (synchronous) closure, so check-then-mutate sequences
/// such as the copy reservation or the active-loan cap check cannot
/// interleave. Two concurrent loan creations against a book with one
/// remaining copy resolve to exactly one success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a mutating operation as one atomic transaction.
    ///
    /// The closure stages its writes on the [`Transaction`]; they are
    /// applied to the tables only when it returns `Ok`. On `Err` every
    /// staged write is discarded, leaving the store untouched.
    ///
    /// The closure is synchronous by design: nothing may await while the
    /// table lock is held.
    pub async fn transaction<T, F>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&mut Transaction<'a>) -> AppResult<T>,
    {
        let mut tables = self.tables.write().await;
        let mut tx = Transaction::new(&tables);
        match f(&mut tx) {
            Ok(value) => {
                let writes = tx.into_writes();
                writes.apply(&mut tables);
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    /// Run a read-only closure against a consistent snapshot of the tables.
    pub async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Tables) -> T,
    {
        let tables = self.tables.read().await;
        f(&tables)
    }
}
