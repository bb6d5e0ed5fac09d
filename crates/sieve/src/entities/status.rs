use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::{Entity, QueryEnum};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, QueryEnum)]
pub enum ProcessStatusKind {
    NotFound,
    Unknown,
    Initialized,
    Running,
    Idled,
    Finalized,
    Terminated,
    Error,
}

/// Execution status of a process, keyed by the process id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "ProcessStatus")]
pub struct ProcessStatus {
    #[query(Guid, key)]
    pub id: Uuid,

    #[query(Guid)]
    pub lock: Uuid,

    #[query(Enum)]
    pub status: ProcessStatusKind,

    #[query(String, searchable)]
    pub runtime_id: String,

    #[query(DateTime)]
    pub set_time: DateTime<Utc>,

    #[query(String, searchable)]
    pub tenant_id: Option<String>,
}
