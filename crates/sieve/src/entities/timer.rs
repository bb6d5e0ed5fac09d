use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sieve_macros::Entity;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "ProcessTimer")]
pub struct ProcessTimer {
    #[query(Guid, key)]
    pub id: Uuid,

    #[query(Guid, parent)]
    pub process_id: Uuid,

    #[query(Guid)]
    pub root_process_id: Uuid,

    #[query(String, searchable)]
    pub name: String,

    #[query(DateTime)]
    pub next_execution_date_time: DateTime<Utc>,

    #[query(Boolean)]
    pub ignore: bool,
}
