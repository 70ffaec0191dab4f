//! Audit trail query service.

use std::sync::Arc;

use biblio_core::config::audit::AuditConfig;
use biblio_core::error::AppError;
use biblio_core::types::id::AuditLogId;
use biblio_entity::audit::{AuditLogEntry, AuditQuery};
use biblio_store::repositories::AuditLogRepository;

/// Read access to the audit trail.
///
/// Recording is not exposed here: entries are appended inside the domain
/// transactions that produce them, so they cannot drift from the mutations
/// they document.
#[derive(Debug, Clone)]
pub struct AuditService {
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
    /// Query limits.
    config: AuditConfig,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(audit_repo: Arc<AuditLogRepository>, config: AuditConfig) -> Self {
        Self { audit_repo, config }
    }

    /// Search the audit trail, newest entry first.
    ///
    /// All filters are optional and conjunctive. The requested limit
    /// defaults to the configured query limit and is clamped to the hard
    /// cap.
    pub async fn query(&self, query: &AuditQuery) -> Vec<AuditLogEntry> {
        let limit = query
            .limit
            .unwrap_or(self.config.default_query_limit)
            .min(self.config.max_query_limit);
        self.audit_repo.search(query, limit).await
    }

    /// Fetch a single audit entry.
    pub async fn get_by_id(&self, id: AuditLogId) -> Result<AuditLogEntry, AppError> {
        self.audit_repo
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Audit entry {id} not found")))
    }

    /// Total number of entries recorded so far.
    pub async fn count(&self) -> u64 {
        self.audit_repo.count().await
    }
}
