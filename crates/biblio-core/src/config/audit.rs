//! Audit trail query configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to audit trail queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Number of entries returned when the caller does not ask for a limit.
    #[serde(default = "default_query_limit")]
    pub default_query_limit: usize,
    /// Hard cap; requested limits are clamped to this value.
    #[serde(default = "default_max_query_limit")]
    pub max_query_limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_query_limit: default_query_limit(),
            max_query_limit: default_max_query_limit(),
        }
    }
}

fn default_query_limit() -> usize {
    100
}

fn default_max_query_limit() -> usize {
    500
}
