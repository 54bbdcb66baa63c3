use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// An append-only audit history entry recording a campaign mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AuditEntry {
    pub id: String,
    pub campaign_id: String,
    pub action: AuditAction,
    /// Human-readable summary, e.g. which margin goal was applied.
    pub description: String,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
