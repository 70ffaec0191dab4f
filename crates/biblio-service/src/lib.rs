//! # biblio-service
//!
//! Business logic service layer for Biblio. Each service orchestrates the
//! store and repositories to implement one area of the circulation core:
//! catalog, membership, the lending ledger, the audit trail, and the
//! read-only query façade.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Every mutating operation
//! takes a [`RequestContext`] so the acting user and request origin reach
//! the audit trail explicitly rather than through ambient state.

pub mod audit;
pub mod catalog;
pub mod context;
pub mod ledger;
pub mod membership;
pub mod query;

pub use audit::AuditService;
pub use catalog::CatalogService;
pub use context::RequestContext;
pub use ledger::LoanService;
pub use membership::MembershipService;
pub use query::QueryService;
