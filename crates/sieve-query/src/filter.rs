//! Filter expression tree.
//!
//! A [`Filter`] is the caller-facing form of a predicate: leaf comparisons
//! naming fields by string, and `And`/`Or`/`Not` combinators over children.
//! It is what travels over the wire, serialized with an `"operator"` tag:
//!
//! ```json
//! { "operator": "And", "children": [
//!     { "operator": "Equal", "field": "TenantId", "value": "acme" },
//!     { "operator": "Not", "children": [
//!         { "operator": "In", "field": "StateName", "values": ["Draft", "Closed"] }
//!     ] }
//! ] }
//! ```
//!
//! Filters are not checked on construction. Validation against an entity's
//! registry happens when a query is prepared (see [`Predicate`](crate::Predicate)).

use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::op::Op;

/// A node of a filter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator")]
pub enum Filter {
    Equal {
        field: String,
        value: Literal,
    },
    In {
        field: String,
        values: Vec<Literal>,
    },
    Contains {
        field: String,
        value: String,
    },
    StartsWith {
        field: String,
        value: String,
    },
    Greater {
        field: String,
        value: Literal,
    },
    GreaterOrEqual {
        field: String,
        value: Literal,
    },
    Less {
        field: String,
        value: Literal,
    },
    LessOrEqual {
        field: String,
        value: Literal,
    },
    Matches {
        field: String,
        pattern: String,
    },
    And {
        #[serde(default)]
        children: Vec<Filter>,
    },
    Or {
        #[serde(default)]
        children: Vec<Filter>,
    },
    /// Must have exactly one child; kept as a list so that malformed input
    /// survives deserialization and is rejected by validation.
    Not {
        #[serde(default)]
        children: Vec<Filter>,
    },
}

impl Filter {
    // ========================================================================
    // Leaf constructors
    // ========================================================================

    /// Field equals value.
    pub fn equal(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Filter::Equal {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field equals one of the values.
    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Literal>,
    {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// String field contains a substring, or list field has an element
    /// equal to `value`.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// String field starts with a prefix.
    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::StartsWith {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Filter::Greater {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_or_equal(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Filter::GreaterOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn less(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Filter::Less {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn less_or_equal(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Filter::LessOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// String field matches a regular expression.
    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Filter::Matches {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Conjunction of the children. An empty list matches everything.
    pub fn and(children: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And {
            children: children.into_iter().collect(),
        }
    }

    /// Disjunction of the children. An empty list matches nothing.
    pub fn or(children: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or {
            children: children.into_iter().collect(),
        }
    }

    /// Negation of a filter.
    pub fn not(child: Filter) -> Self {
        Filter::Not {
            children: vec![child],
        }
    }

    /// Normalizes a flat filter list into its canonical tree form.
    ///
    /// A list passed to a collection request is an implicit conjunction.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::and(filters)
    }

    /// Wraps this filter in a `Not`.
    pub fn negate(self) -> Self {
        Filter::not(self)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the operator of this node.
    pub fn op(&self) -> Op {
        match self {
            Filter::Equal { .. } => Op::Equal,
            Filter::In { .. } => Op::In,
            Filter::Contains { .. } => Op::Contains,
            Filter::StartsWith { .. } => Op::StartsWith,
            Filter::Greater { .. } => Op::Greater,
            Filter::GreaterOrEqual { .. } => Op::GreaterOrEqual,
            Filter::Less { .. } => Op::Less,
            Filter::LessOrEqual { .. } => Op::LessOrEqual,
            Filter::Matches { .. } => Op::Matches,
            Filter::And { .. } => Op::And,
            Filter::Or { .. } => Op::Or,
            Filter::Not { .. } => Op::Not,
        }
    }

    /// Returns the field a leaf compares, or `None` for combinators.
    pub fn field(&self) -> Option<&str> {
        match self {
            Filter::Equal { field, .. }
            | Filter::In { field, .. }
            | Filter::Contains { field, .. }
            | Filter::StartsWith { field, .. }
            | Filter::Greater { field, .. }
            | Filter::GreaterOrEqual { field, .. }
            | Filter::Less { field, .. }
            | Filter::LessOrEqual { field, .. }
            | Filter::Matches { field, .. } => Some(field),
            Filter::And { .. } | Filter::Or { .. } | Filter::Not { .. } => None,
        }
    }

    /// Returns the children of a combinator, or an empty slice for leaves.
    pub fn children(&self) -> &[Filter] {
        match self {
            Filter::And { children } | Filter::Or { children } | Filter::Not { children } => {
                children
            }
            _ => &[],
        }
    }
}
