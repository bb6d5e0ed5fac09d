use serde::{Deserialize, Serialize};
use sieve_macros::Entity;

/// A workflow scheme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "PascalCase")]
#[query(entity = "Scheme")]
pub struct Scheme {
    #[query(String, key, searchable)]
    pub code: String,

    /// Serialized scheme body. Queryable, but never searched.
    #[query(String)]
    pub scheme: String,

    #[query(Integer)]
    pub version: i32,

    #[query(Boolean)]
    pub can_be_inlined: bool,

    #[query(StringList)]
    pub inlined_schemes: Vec<String>,

    #[query(StringList, searchable)]
    pub tags: Vec<String>,
}
