//! Read-side repositories over the store.
//!
//! Repositories take snapshot reads under the table read lock and never
//! mutate; every mutation goes through a store transaction owned by the
//! service layer.

pub mod audit;
pub mod book;
pub mod loan;
pub mod user;

pub use audit::AuditLogRepository;
pub use book::BookRepository;
pub use loan::LoanRepository;
pub use user::UserRepository;
