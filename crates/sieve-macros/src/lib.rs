//! Proc macros for Sieve.
//!
//! # Available Macros
//!
//! - [`Entity`] - Generate a field registry and typed accessor from struct annotations
//! - [`QueryEnum`] - Expose an enum's variant names to `Enum` fields
//!
//! Generated code refers to `::sieve_query` by default, so crates using the
//! derives need a direct `sieve-query` dependency. Crates that only depend
//! on the `sieve` facade add `#[query(crate = "::sieve::query")]` to the
//! type.
//!
//! For working examples, see `sieve/tests/entity_derive.rs`.

mod entity;
mod query_enum;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Entity` trait for queryable record structs.
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `entity = "..."` | Entity name used in error messages (default: the struct name) |
/// | `crate = "..."` | Path to `sieve-query` in generated code (default: `::sieve_query`) |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Guid` | `Uuid` field |
/// | `String` | `String` field |
/// | `Integer` | `i32` field |
/// | `Long` | `i64` field |
/// | `Boolean` | `bool` field |
/// | `DateTime` | `DateTime<Utc>` or `DateTime<FixedOffset>` field |
/// | `Enum` | enum field, requires a `QueryEnum` impl |
/// | `StringList` | `Vec<String>` field |
/// | `key` | Part of the primary key (at least one required) |
/// | `parent` | Holds the parent collection key (at most one) |
/// | `searchable` | Included in free-text search |
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Transport name (default: PascalCase of the field name) |
///
/// Fields without a type attribute are not queryable. `Option<T>` fields
/// are registered as nullable.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Process::TENANT_ID == "TenantId"`)
/// 2. `Entity::registry()`, built once on first use
/// 3. `Entity::field_value()`
///
/// # Example
///
/// ```ignore
/// use chrono::{DateTime, Utc};
/// use sieve_macros::Entity;
/// use uuid::Uuid;
///
/// #[derive(Clone, Entity)]
/// #[query(entity = "ProcessTimer")]
/// struct ProcessTimer {
///     #[query(Guid, key)]
///     id: Uuid,
///
///     #[query(Guid, parent)]
///     process_id: Uuid,
///
///     #[query(String, searchable)]
///     name: String,
///
///     #[query(DateTime)]
///     next_execution_date_time: DateTime<Utc>,
///
///     #[query(Boolean)]
///     ignore: bool,
/// }
///
/// assert_eq!(ProcessTimer::NEXT_EXECUTION_DATE_TIME, "NextExecutionDateTime");
/// ```
#[proc_macro_derive(Entity, attributes(query))]
pub fn entity_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::entity_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives the `QueryEnum` trait for fieldless enums.
///
/// Variant names are the variant identifiers unless overridden with
/// `#[query(rename = "...")]`. Declaration order is the sort order.
/// `#[query(crate = "...")]` on the enum sets the path to `sieve-query`.
///
/// # Example
///
/// ```ignore
/// use sieve_macros::QueryEnum;
///
/// #[derive(Clone, Copy, QueryEnum)]
/// enum RuntimeStatus {
///     Alive,
///     SelfRestore,
///     Dead,
/// }
/// ```
#[proc_macro_derive(QueryEnum, attributes(query))]
pub fn query_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query_enum::query_enum_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
