//! Filter operators.
//!
//! The [`Op`] enum names every node kind a filter tree can contain. Leaf
//! operators compare a field against a value; combinators compose child
//! filters. Not every leaf operator applies to every field type.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// Operator of a filter node.
///
/// Operators are grouped by role:
/// - **Leaf**: `Equal`, `In` - valid for all field types
/// - **Text**: `Contains`, `StartsWith` - strings and string lists
/// - **Range**: `Greater`, `GreaterOrEqual`, `Less`, `LessOrEqual`
/// - **Pattern**: `Matches` - regular expression over strings
/// - **Combinators**: `And`, `Or`, `Not`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Field equals the value.
    Equal,
    /// Field equals at least one value of a set.
    In,
    /// String contains a substring, or a list has an element containing it.
    Contains,
    /// String starts with a prefix, or a list has an element starting with it.
    StartsWith,
    /// Strictly greater than.
    Greater,
    /// Greater than or equal.
    GreaterOrEqual,
    /// Strictly less than.
    Less,
    /// Less than or equal.
    LessOrEqual,
    /// String matches a regular expression.
    Matches,
    /// Every child matches. Empty = matches everything.
    And,
    /// At least one child matches. Empty = matches nothing.
    Or,
    /// The single child does not match.
    Not,
}

impl Op {
    /// Returns `true` for operators that compare a field.
    pub fn is_leaf(self) -> bool {
        !self.is_combinator()
    }

    /// Returns `true` for `And`, `Or` and `Not`.
    pub fn is_combinator(self) -> bool {
        matches!(self, Op::And | Op::Or | Op::Not)
    }

    /// Returns `true` for the ordering comparisons.
    pub fn is_range(self) -> bool {
        matches!(
            self,
            Op::Greater | Op::GreaterOrEqual | Op::Less | Op::LessOrEqual
        )
    }

    /// Returns `true` if this operator can be applied to fields of `ty`.
    pub fn accepts(self, ty: ValueType) -> bool {
        match self {
            Op::Equal | Op::In => true,
            Op::Contains | Op::StartsWith => {
                matches!(ty, ValueType::String | ValueType::StringList)
            }
            Op::Greater | Op::GreaterOrEqual | Op::Less | Op::LessOrEqual => ty.is_ordered(),
            Op::Matches => ty == ValueType::String,
            Op::And | Op::Or | Op::Not => false,
        }
    }

    /// Evaluates a range comparison given `field.cmp(value)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Equal => ordering == Ordering::Equal,
            Op::Greater => ordering == Ordering::Greater,
            Op::GreaterOrEqual => ordering != Ordering::Less,
            Op::Less => ordering == Ordering::Less,
            Op::LessOrEqual => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the transport name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equal => "Equal",
            Op::In => "In",
            Op::Contains => "Contains",
            Op::StartsWith => "StartsWith",
            Op::Greater => "Greater",
            Op::GreaterOrEqual => "GreaterOrEqual",
            Op::Less => "Less",
            Op::LessOrEqual => "LessOrEqual",
            Op::Matches => "Matches",
            Op::And => "And",
            Op::Or => "Or",
            Op::Not => "Not",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
