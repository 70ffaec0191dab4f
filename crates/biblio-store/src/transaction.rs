//! Staged-write transaction over the table set.

use std::collections::HashMap;

use biblio_core::types::id::{BookId, LoanId, UserId};
use biblio_entity::audit::AuditLogEntry;
use biblio_entity::book::Book;
use biblio_entity::loan::Loan;
use biblio_entity::user::User;

use crate::memory::Tables;

/// One in-flight transaction.
///
/// Reads see staged rows layered over the committed tables; writes go only
/// to the staging area. [`MemoryStore::transaction`](crate::MemoryStore::transaction)
/// applies the staged rows on success and drops them on error.
#[derive(Debug)]
pub struct Transaction<'a> {
    base: &'a Tables,
    books: HashMap<BookId, Book>,
    users: HashMap<UserId, User>,
    loans: HashMap<LoanId, Loan>,
    audit_log: Vec<AuditLogEntry>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(base: &'a Tables) -> Self {
        Self {
            base,
            books: HashMap::new(),
            users: HashMap::new(),
            loans: HashMap::new(),
            audit_log: Vec::new(),
        }
    }

    // ── Books ────────────────────────────────────────────────────

    /// Look up a book, staged rows first.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id).or_else(|| self.base.books.get(&id))
    }

    /// Stage an insert or update of a book row.
    pub fn put_book(&mut self, book: Book) {
        self.books.insert(book.id, book);
    }

    /// Whether any book (staged or committed) carries this isbn.
    pub fn isbn_exists(&self, isbn: &str) -> bool {
        self.books_iter().any(|b| b.isbn == isbn)
    }

    fn books_iter(&self) -> impl Iterator<Item = &Book> {
        self.books.values().chain(
            self.base
                .books
                .values()
                .filter(|b| !self.books.contains_key(&b.id)),
        )
    }

    // ── Users ────────────────────────────────────────────────────

    /// Look up a user, staged rows first.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id).or_else(|| self.base.users.get(&id))
    }

    /// Stage an insert of a user row.
    pub fn put_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Whether any user carries this username.
    pub fn username_exists(&self, username: &str) -> bool {
        self.users_iter().any(|u| u.username == username)
    }

    /// Whether any user carries this email.
    pub fn email_exists(&self, email: &str) -> bool {
        self.users_iter().any(|u| u.email == email)
    }

    /// Whether any user carries this phone number.
    pub fn phone_exists(&self, phone: &str) -> bool {
        self.users_iter().any(|u| u.phone == phone)
    }

    fn users_iter(&self) -> impl Iterator<Item = &User> {
        self.users.values().chain(
            self.base
                .users
                .values()
                .filter(|u| !self.users.contains_key(&u.id)),
        )
    }

    // ── Loans ────────────────────────────────────────────────────

    /// Look up a loan, staged rows first.
    pub fn loan(&self, id: LoanId) -> Option<&Loan> {
        self.loans.get(&id).or_else(|| self.base.loans.get(&id))
    }

    /// Stage an insert or update of a loan row.
    pub fn put_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id, loan);
    }

    /// Count the user's active loans, staged rows included.
    ///
    /// This is the authoritative count for the loan-cap check: it runs
    /// under the same write lock as the insert that follows it.
    pub fn count_active_loans(&self, user_id: UserId) -> usize {
        self.loans_iter()
            .filter(|l| l.user_id == user_id && l.is_active())
            .count()
    }

    fn loans_iter(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values().chain(
            self.base
                .loans
                .values()
                .filter(|l| !self.loans.contains_key(&l.id)),
        )
    }

    // ── Audit ────────────────────────────────────────────────────

    /// Stage an audit entry append.
    pub fn append_audit(&mut self, entry: AuditLogEntry) {
        self.audit_log.push(entry);
    }

    pub(crate) fn into_writes(self) -> StagedWrites {
        StagedWrites {
            books: self.books,
            users: self.users,
            loans: self.loans,
            audit_log: self.audit_log,
        }
    }
}

/// Owned staged rows, detached from the base borrow so they can be applied.
#[derive(Debug)]
pub(crate) struct StagedWrites {
    books: HashMap<BookId, Book>,
    users: HashMap<UserId, User>,
    loans: HashMap<LoanId, Loan>,
    audit_log: Vec<AuditLogEntry>,
}

impl StagedWrites {
    pub(crate) fn apply(self, tables: &mut Tables) {
        tables.books.extend(self.books);
        tables.users.extend(self.users);
        tables.loans.extend(self.loans);
        tables.audit_log.extend(self.audit_log);
    }
}
