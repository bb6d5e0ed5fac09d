//! Sieve Query - Typed filtering, sorting and pagination for entity collections.
//!
//! Sieve Query evaluates caller-supplied queries against collections of
//! typed records. It provides:
//!
//! - A per-entity field registry: the closed set of queryable fields
//! - A filter tree with `Equal`, `In`, range and string leaves and
//!   `And`/`Or`/`Not` combinators, serializable as tagged JSON
//! - Free-text search over the entity's searchable fields
//! - Multi-key sorting with the primary key as implicit final tiebreaker
//! - Skip/take paging with a `{ total, collection }` result envelope
//! - Predicate-based delete and update
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::OnceLock;
//! use sieve_query::{
//!     AsValue, Entity, Field, FieldRegistry, Filter, QueryDescriptor, QueryEngine, Sort, Value,
//!     ValueType,
//! };
//!
//! #[derive(Clone)]
//! struct Approval {
//!     id: i64,
//!     identity_id: String,
//!     state: String,
//! }
//!
//! impl Entity for Approval {
//!     fn registry() -> &'static FieldRegistry {
//!         static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
//!         REGISTRY.get_or_init(|| {
//!             FieldRegistry::builder("Approval")
//!                 .field(Field::new("Id", ValueType::Long).key())
//!                 .field(Field::new("IdentityId", ValueType::String))
//!                 .field(Field::new("State", ValueType::String))
//!                 .build()
//!         })
//!     }
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "Id" => self.id.as_value(),
//!             "IdentityId" => self.identity_id.as_value(),
//!             "State" => self.state.as_value(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let approvals = vec![
//!     Approval { id: 1, identity_id: "ann".into(), state: "Draft".into() },
//!     Approval { id: 2, identity_id: "bob".into(), state: "Review".into() },
//!     Approval { id: 3, identity_id: "ann".into(), state: "Review".into() },
//! ];
//!
//! let query = QueryDescriptor::new()
//!     .filter(Filter::and([
//!         Filter::equal("State", "Review"),
//!         Filter::not(Filter::equal("IdentityId", "bob")),
//!     ]))
//!     .sort(Sort::desc("Id"))
//!     .take(10);
//!
//! let page = QueryEngine::default().execute(&query, &approvals).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(page.collection[0].id, 3);
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! Equal(f, v)   record value equals v (null equals null)
//! In(f, vs)     Equal(f, v) for some v in vs; In(f, []) matches nothing
//! And(cs)       every child matches; And([]) matches everything
//! Or(cs)        some child matches; Or([]) matches nothing
//! Not(c)        c does not match
//! ```
//!
//! Comparisons involving a null record value are false, so `Not(Equal(f, v))`
//! matches records where `f` is null.
//!
//! # Field Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | Guid | `Equal`, `In`, range |
//! | String | `Equal`, `In`, `Contains`, `StartsWith`, `Matches`, range |
//! | Integer, Long | `Equal`, `In`, range |
//! | Boolean | `Equal`, `In` |
//! | DateTime | `Equal`, `In`, range |
//! | Enum | `Equal`, `In` |
//! | StringList | `Equal`, `In`, `Contains`, `StartsWith` |
//!
//! Range operators are `Greater`, `GreaterOrEqual`, `Less`, `LessOrEqual`.
//! On StringList fields `Contains` tests for an equal element and
//! `StartsWith` for an element with the prefix. Free-text search matches
//! substrings of list elements.

mod access;
mod cancel;
mod config;
mod descriptor;
mod engine;
mod error;
mod filter;
mod literal;
mod op;
mod ordering;
mod page;
mod predicate;
mod registry;
mod source;
mod traits;
mod value;

// Re-export public API
pub use access::{AccessPolicy, AllowAll, Operation};
pub use cancel::CancelToken;
pub use config::QueryConfig;
pub use descriptor::{CollectionRequest, Paging, QueryDescriptor};
pub use engine::{PreparedQuery, QueryEngine};
pub use error::{ConfigError, QueryError, Result};
pub use filter::Filter;
pub use literal::Literal;
pub use op::Op;
pub use ordering::{compare_values, Direction, Sort, SortPlan};
pub use page::Page;
pub use predicate::Predicate;
pub use registry::{Field, FieldRegistry, RegistryBuilder};
pub use source::{MemoryStore, MutableSource, RecordSource, StoreError};
pub use traits::{AsValue, Entity, QueryEnum};
pub use value::{Value, ValueType};
