//! Audit entry construction inside domain transactions.
//!
//! Recording rides the caller's transaction: no domain mutation can commit
//! without its audit entry, and a failed operation leaves no entry behind.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use biblio_core::types::id::{AuditLogId, UserId};
use biblio_entity::audit::{AuditAction, AuditEntityType, AuditLogEntry};
use biblio_store::Transaction;

/// Append an audit entry to the caller's transaction.
#[allow(clippy::too_many_arguments)]
pub(crate) fn record(
    tx: &mut Transaction<'_>,
    timestamp: DateTime<Utc>,
    action: AuditAction,
    entity_type: AuditEntityType,
    entity_id: Uuid,
    user_id: Option<UserId>,
    details: Option<serde_json::Value>,
    source_address: Option<String>,
) {
    tx.append_audit(AuditLogEntry {
        id: AuditLogId::new(),
        action,
        entity_type,
        entity_id,
        user_id,
        timestamp,
        details,
        source_address,
    });
}

/// Encode a detail payload for an audit entry.
///
/// Detail serialization must never abort the enclosing domain operation:
/// when a payload cannot be encoded as JSON, a best-effort debug string is
/// stored instead.
pub fn encode_details<T: Serialize + fmt::Debug>(details: &T) -> serde_json::Value {
    match serde_json::to_value(details) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "Audit details not JSON-serializable, storing debug string");
            serde_json::Value::String(format!("{details:?}"))
        }
    }
}
