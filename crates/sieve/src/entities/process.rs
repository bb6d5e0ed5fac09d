use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::Entity;
use uuid::Uuid;

/// A workflow process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "Process")]
pub struct Process {
    #[query(Guid, key)]
    pub id: Uuid,

    #[query(Guid)]
    pub scheme_id: Uuid,

    #[query(String, searchable)]
    pub state_name: String,

    #[query(String, searchable)]
    pub activity_name: String,

    #[query(String)]
    pub previous_state: Option<String>,

    #[query(String)]
    pub previous_activity: Option<String>,

    #[query(String, searchable)]
    pub tenant_id: Option<String>,

    #[query(Guid)]
    pub parent_process_id: Option<Uuid>,

    #[query(Guid)]
    pub root_process_id: Uuid,

    #[query(String, searchable)]
    pub subprocess_name: Option<String>,

    #[query(DateTime)]
    pub creation_date: DateTime<Utc>,

    #[query(DateTime)]
    pub last_transition_date: Option<DateTime<Utc>>,

    #[query(Boolean)]
    pub is_deterministic_subprocess: bool,
}
