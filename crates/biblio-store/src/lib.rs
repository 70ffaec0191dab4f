//! # biblio-store
//!
//! The transactional store backing the circulation core. All tables live
//! behind a single async read/write lock; mutations run inside
//! [`MemoryStore::transaction`], which stages writes and applies them only
//! when the operation succeeds. A loan state change therefore cannot
//! persist without its audit entry, and vice versa.
//!
//! Read-side access goes through the repositories, which take snapshot
//! reads and never mutate.

pub mod memory;
pub mod repositories;
pub mod transaction;

pub use memory::{MemoryStore, Tables};
pub use transaction::Transaction;
