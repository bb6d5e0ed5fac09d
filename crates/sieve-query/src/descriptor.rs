//! Query descriptors.
//!
//! [`QueryDescriptor`] is the complete, self-contained description of a
//! query: free-text search, filter tree, sort keys and paging. It carries no
//! entity reference; the entity is chosen by the type the query runs over.
//!
//! [`CollectionRequest`] is the flat transport form used by collection
//! endpoints. It is normalized into a descriptor with
//! [`CollectionRequest::into_descriptor`], so both forms evaluate the same way.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::filter::Filter;
use crate::literal::Literal;
use crate::op::Op;
use crate::ordering::Sort;
use crate::registry::FieldRegistry;

/// A complete query: search, filters, sorts and paging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescriptor {
    /// Free-text term matched against the entity's searchable fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Filter tree. `None` matches every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filter>,
    /// Sort keys, most significant first.
    pub sorts: Vec<Sort>,
    /// Number of matching records to skip. Must not be negative.
    pub skip: i64,
    /// Page size. `None` uses the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the filter tree, replacing any previous one.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters = Some(filter);
        self
    }

    /// ANDs `filter` onto the current filter tree.
    pub fn and_filter(mut self, filter: Filter) -> Self {
        self.filters = Some(match self.filters.take() {
            None => filter,
            Some(Filter::And { mut children }) => {
                children.push(filter);
                Filter::And { children }
            }
            Some(existing) => Filter::and([existing, filter]),
        });
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: i64) -> Self {
        self.take = Some(take);
        self
    }

    /// Returns the search term, or `None` if it is absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Flat collection request as received from a transport layer.
///
/// Filters form an implicit conjunction. `parent`, when present, restricts
/// the collection to the children of one parent record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Literal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub filters: Vec<Filter>,
    pub sorts: Vec<Sort>,
    pub skip: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,
}

impl CollectionRequest {
    /// Normalizes the request into a [`QueryDescriptor`].
    ///
    /// The filter list becomes a single `And`; the parent key becomes an
    /// additional `Equal` on the entity's parent field.
    pub fn into_descriptor(self, registry: &FieldRegistry) -> Result<QueryDescriptor> {
        let mut filters = self.filters;

        if let Some(parent) = self.parent {
            let field = registry
                .parent_field()
                .ok_or_else(|| QueryError::MalformedFilter {
                    op: Op::Equal,
                    reason: format!("entity '{}' has no parent field", registry.entity()),
                })?;
            filters.push(Filter::equal(field.name(), parent));
        }

        let filters = match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::all(filters)),
        };

        Ok(QueryDescriptor {
            search: self.search,
            filters,
            sorts: self.sorts,
            skip: self.skip,
            take: self.take,
        })
    }
}

/// Validated paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub skip: usize,
    pub take: usize,
}

impl Paging {
    /// Returns the index range of the page within `len` sorted records.
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.skip.min(len);
        let end = start.saturating_add(self.take).min(len);
        start..end
    }
}
