//! Request context carrying the acting user and request origin.

use serde::{Deserialize, Serialize};

use biblio_core::types::id::UserId;

/// Context for the current request.
///
/// Passed into every mutating service method so the audit trail knows
/// *who* acted and from *where*, without reaching into ambient
/// transport state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user, when authenticated.
    pub actor_id: Option<UserId>,
    /// Network origin of the request (IP address), when known.
    pub source_address: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor_id: Option<UserId>, source_address: Option<String>) -> Self {
        Self {
            actor_id,
            source_address,
        }
    }

    /// Context with no actor and no origin (internal callers, tests).
    pub fn anonymous() -> Self {
        Self::default()
    }
}
