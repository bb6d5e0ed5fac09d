use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::{Entity, QueryEnum};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, QueryEnum)]
pub enum RuntimeStatus {
    Alive,
    SelfRestore,
    Restore,
    Dead,
    Terminated,
}

/// A workflow runtime node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "Runtime")]
pub struct Runtime {
    #[query(String, key, searchable)]
    pub id: String,

    #[query(Guid)]
    pub lock: Uuid,

    #[query(Enum)]
    pub status: RuntimeStatus,

    #[query(String, searchable)]
    pub restorer_id: Option<String>,

    #[query(DateTime)]
    pub next_timer_time: Option<DateTime<Utc>>,

    #[query(DateTime)]
    pub next_service_timer_time: Option<DateTime<Utc>>,

    #[query(DateTime)]
    pub last_alive_signal: Option<DateTime<Utc>>,
}
