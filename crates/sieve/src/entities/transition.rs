use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::{Entity, QueryEnum};
use uuid::Uuid;

/// Direction of a transition relative to the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, QueryEnum)]
pub enum TransitionClassifier {
    NotSpecified,
    Direct,
    Reverse,
}

/// One executed transition of a process, as recorded in its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "Transition")]
pub struct Transition {
    #[query(Guid, key)]
    pub id: Uuid,

    #[query(Guid, parent)]
    pub process_id: Uuid,

    #[query(String, searchable)]
    pub executor_identity_id: Option<String>,

    #[query(String, searchable)]
    pub actor_identity_id: Option<String>,

    #[query(String)]
    pub from_state_name: Option<String>,

    #[query(String)]
    pub to_state_name: Option<String>,

    #[query(String)]
    pub from_activity_name: String,

    #[query(String)]
    pub to_activity_name: String,

    #[query(String, searchable)]
    pub trigger_name: Option<String>,

    #[query(Enum)]
    pub transition_classifier: TransitionClassifier,

    #[query(DateTime)]
    pub transition_time: DateTime<Utc>,

    #[query(Boolean)]
    pub is_finalised: bool,

    /// Milliseconds spent executing the transition.
    #[query(Long)]
    pub transition_duration: Option<i64>,
}
