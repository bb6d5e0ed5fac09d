use serde::{Deserialize, Serialize};
use sieve_macros::Entity;
use uuid::Uuid;

/// A persisted process parameter. Identified by `(ProcessId, Name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "ProcessParameter")]
pub struct ProcessParameter {
    #[query(Guid, key, parent)]
    pub process_id: Uuid,

    #[query(String, key, searchable)]
    pub name: String,

    /// Serialized parameter value.
    #[query(String, searchable)]
    pub value: Option<String>,
}
