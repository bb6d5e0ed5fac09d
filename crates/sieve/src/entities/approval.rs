use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::Entity;
use uuid::Uuid;

/// An approval history entry. Entries without a `TransitionTime` are still
/// pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "Approval")]
pub struct Approval {
    #[query(Guid, key)]
    pub id: Uuid,

    #[query(Guid, parent)]
    pub process_id: Uuid,

    #[query(String, searchable)]
    pub identity_id: Option<String>,

    #[query(StringList)]
    pub allowed_to: Vec<String>,

    #[query(DateTime)]
    pub transition_time: Option<DateTime<Utc>>,

    #[query(Long)]
    pub sort: Option<i64>,

    #[query(String)]
    pub initial_state: String,

    #[query(String)]
    pub destination_state: String,

    #[query(String, searchable)]
    pub trigger_name: Option<String>,

    #[query(String, searchable)]
    pub commentary: Option<String>,
}
