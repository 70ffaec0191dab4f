//! Audit trail query filter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use biblio_core::types::id::UserId;

use super::action::{AuditAction, AuditEntityType};

/// Filter for searching the audit trail.
///
/// All filters are optional and conjunctive. Results are returned
/// newest-first; `limit` is clamped by the audit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Restrict to entries about this kind of entity.
    pub entity_type: Option<AuditEntityType>,
    /// Restrict to entries about this entity.
    pub entity_id: Option<Uuid>,
    /// Restrict to this action.
    pub action: Option<AuditAction>,
    /// Restrict to this acting user.
    pub user_id: Option<UserId>,
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

impl AuditQuery {
    /// Query scoped to one entity.
    pub fn for_entity(entity_type: AuditEntityType, entity_id: Uuid) -> Self {
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
            ..Self::default()
        }
    }
}
