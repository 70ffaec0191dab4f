//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use biblio_core::types::id::{AuditLogId, UserId};

use super::action::{AuditAction, AuditEntityType};

/// An immutable record of one domain event.
///
/// Entries are appended in the same transaction as the mutation they
/// document and are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The action that was performed.
    pub action: AuditAction,
    /// The kind of entity affected.
    pub entity_type: AuditEntityType,
    /// The affected entity's ID (raw UUID; entity types carry different
    /// typed ids).
    pub entity_id: Uuid,
    /// The acting user, when known. Not necessarily the loan's borrower.
    pub user_id: Option<UserId>,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
    /// Additional context about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// Network origin of the request that triggered the action.
    pub source_address: Option<String>,
}
