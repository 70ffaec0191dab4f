//! # biblio
//!
//! Library circulation core: catalog, membership, the lending ledger, the
//! audit trail, and a read-only query façade, wired over a transactional
//! in-memory store.
//!
//! [`Library`] is the composition root: it builds the store, repositories,
//! and services in one place, the way a server binary would, and hands
//! back the service set. Transport and persistence adapters live outside
//! this crate and talk to the services directly.

pub mod telemetry;

use std::sync::Arc;

use tracing::info;

use biblio_core::config::AppConfig;
use biblio_core::traits::{Clock, SystemClock};
use biblio_service::{
    AuditService, CatalogService, LoanService, MembershipService, QueryService,
};
use biblio_store::MemoryStore;
use biblio_store::repositories::{
    AuditLogRepository, BookRepository, LoanRepository, UserRepository,
};

pub use biblio_core::{AppError, AppResult, config, error, result, traits, types};
pub use biblio_entity as entity;
pub use biblio_service::RequestContext;
pub use biblio_service::query::views;
pub use biblio_store as store;

/// The wired circulation core.
///
/// All services share one store, one clock, and one policy; cloning the
/// struct clones cheap handles to the same state.
#[derive(Debug, Clone)]
pub struct Library {
    /// Catalog operations.
    pub catalog: CatalogService,
    /// Membership operations.
    pub membership: MembershipService,
    /// The lending ledger.
    pub loans: LoanService,
    /// Audit trail queries.
    pub audit: AuditService,
    /// Composite read views.
    pub query: QueryService,
}

impl Library {
    /// Build the core against the system clock.
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build the core with an injected time source.
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MemoryStore::new());

        let book_repo = Arc::new(BookRepository::new(Arc::clone(&store)));
        let user_repo = Arc::new(UserRepository::new(Arc::clone(&store)));
        let loan_repo = Arc::new(LoanRepository::new(Arc::clone(&store)));
        let audit_repo = Arc::new(AuditLogRepository::new(Arc::clone(&store)));

        let catalog = CatalogService::new(
            Arc::clone(&store),
            Arc::clone(&book_repo),
            Arc::clone(&clock),
        );
        let membership = MembershipService::new(
            Arc::clone(&store),
            Arc::clone(&user_repo),
            Arc::clone(&loan_repo),
            Arc::clone(&clock),
        );
        let loans = LoanService::new(
            Arc::clone(&store),
            Arc::clone(&loan_repo),
            Arc::clone(&user_repo),
            Arc::clone(&book_repo),
            Arc::clone(&clock),
            config.circulation.clone(),
        );
        let audit = AuditService::new(Arc::clone(&audit_repo), config.audit.clone());
        let query = QueryService::new(
            Arc::clone(&book_repo),
            Arc::clone(&user_repo),
            Arc::clone(&loan_repo),
            Arc::clone(&clock),
            config.circulation.clone(),
        );

        info!(
            loan_period_days = config.circulation.loan_period_days,
            max_active_loans = config.circulation.max_active_loans,
            "Circulation core initialized"
        );

        Self {
            catalog,
            membership,
            loans,
            audit,
            query,
        }
    }
}
