//! # Sieve - Typed Query Filtering and Pagination
//!
//! Sieve evaluates structured queries against typed record collections and
//! returns a page of results with an accurate total count. Every entity
//! exposes the same contract:
//!
//! - A filter tree of `Equal`, `In`, range and string leaves combined with
//!   `And`, `Or` and `Not`
//! - Free-text search over the entity's searchable fields
//! - Multi-field sorting, with the primary key as final tiebreaker
//! - Skip/take paging with a `{ total, collection }` envelope
//!
//! ## Core Concepts
//!
//! - [`Entity`]: a record type with a closed set of typed, queryable fields
//! - [`Filter`]: the predicate tree, serializable as tagged JSON
//! - [`QueryDescriptor`]: search + filters + sorts + paging
//! - [`QueryEngine`]: validates and evaluates descriptors
//! - [`Page`]: the result envelope
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use sieve::entities::InboxEntry;
//! use sieve::{Filter, QueryDescriptor, QueryEngine, Sort};
//! use uuid::Uuid;
//!
//! let process = Uuid::from_u128(1);
//! let entries = vec![
//!     InboxEntry {
//!         process_id: process,
//!         identity_id: "ann".into(),
//!         available_commands: vec!["approve".into(), "reject".into()],
//!         adding_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
//!     },
//!     InboxEntry {
//!         process_id: process,
//!         identity_id: "bob".into(),
//!         available_commands: vec!["approve".into()],
//!         adding_date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
//!     },
//! ];
//!
//! let query = QueryDescriptor::new()
//!     .filter(Filter::contains(InboxEntry::AVAILABLE_COMMANDS, "reject"))
//!     .sort(Sort::desc(InboxEntry::ADDING_DATE));
//!
//! let page = QueryEngine::default().execute(&query, &entries).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(page.collection[0].identity_id, "ann");
//! ```
//!
//! ## Defining Entities
//!
//! The derives expand to paths into `sieve-query`. A crate depending only
//! on `sieve` points them at the re-export with `crate = "::sieve::query"`.
//!
//! ```rust
//! use sieve::{Entity, FieldRegistry};
//! use uuid::Uuid;
//!
//! #[derive(Clone, Entity)]
//! #[query(entity = "Comment", crate = "::sieve::query")]
//! struct Comment {
//!     #[query(Guid, key)]
//!     id: Uuid,
//!     #[query(String, searchable)]
//!     body: String,
//!     #[query(String)]
//!     author: Option<String>,
//! }
//!
//! let registry: &FieldRegistry = Comment::registry();
//! assert!(registry.resolve(Comment::AUTHOR).unwrap().is_nullable());
//! ```

pub mod entities;

// Query engine (re-export from sieve-query)
pub use sieve_query as query;

pub use sieve_query::{
    AccessPolicy, AllowAll, AsValue, CancelToken, CollectionRequest, ConfigError, Direction,
    Entity, Field, FieldRegistry, Filter, Literal, MemoryStore, MutableSource, Operation, Page,
    QueryConfig, QueryDescriptor, QueryEngine, QueryEnum, QueryError, RecordSource, Sort, Value,
    ValueType,
};

// Derive macros share their names with the traits they implement
pub use sieve_macros::{Entity, QueryEnum};
