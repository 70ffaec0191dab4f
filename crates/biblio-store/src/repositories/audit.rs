//! Audit log repository.

use std::sync::Arc;

use biblio_core::types::id::AuditLogId;
use biblio_entity::audit::{AuditLogEntry, AuditQuery};

use crate::memory::MemoryStore;

/// Read access to the audit trail.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    store: Arc<MemoryStore>,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Find an audit entry by ID.
    pub async fn find_by_id(&self, id: AuditLogId) -> Option<AuditLogEntry> {
        self.store
            .read(|t| t.audit_log.iter().find(|e| e.id == id).cloned())
            .await
    }

    /// Search the audit trail with conjunctive filters, newest entry first.
    ///
    /// `limit` is the effective, already-clamped maximum; the service layer
    /// applies the configured defaults and hard cap.
    pub async fn search(&self, query: &AuditQuery, limit: usize) -> Vec<AuditLogEntry> {
        self.store
            .read(|t| {
                t.audit_log
                    .iter()
                    .rev()
                    .filter(|e| {
                        query.entity_type.is_none_or(|et| e.entity_type == et)
                            && query.entity_id.is_none_or(|eid| e.entity_id == eid)
                            && query.action.is_none_or(|a| e.action == a)
                            && query.user_id.is_none_or(|uid| e.user_id == Some(uid))
                    })
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Total number of entries ever recorded.
    pub async fn count(&self) -> u64 {
        self.store.read(|t| t.audit_log.len() as u64).await
    }
}
