use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::Entity;
use uuid::Uuid;

/// A pending action for one identity on one process.
///
/// Identified by the `(ProcessId, IdentityId)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "InboxEntry")]
pub struct InboxEntry {
    #[query(Guid, key, parent)]
    pub process_id: Uuid,

    #[query(String, key, searchable)]
    pub identity_id: String,

    /// Commands the identity may execute, in display order.
    #[query(StringList, searchable)]
    pub available_commands: Vec<String>,

    #[query(DateTime)]
    pub adding_date: DateTime<Utc>,
}
