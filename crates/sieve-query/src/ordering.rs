//! Ordering types for result sorting.
//!
//! Provides [`Direction`] and [`Sort`] for caller-supplied sort keys and
//! [`SortPlan`], the validated multi-key comparator the evaluator uses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{Field, FieldRegistry};
use crate::traits::Entity;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    pub fn is_ascending(self) -> bool {
        matches!(self, Direction::Ascending)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "Ascending",
            Direction::Descending => "Descending",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sort key: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Sort {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Sort::new(field, Direction::Ascending)
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Sort::new(field, Direction::Descending)
    }
}

/// Compares two values of the same field.
///
/// Nulls sort after every other value. Enums follow declaration order,
/// lists compare element by element. Mismatched types compare equal so that
/// later keys can still break the tie.
pub fn compare_values(field: &Field, a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,

        (Value::Guid(a), Value::Guid(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        (Value::StringList(a), Value::StringList(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => field
            .variant_position(a)
            .cmp(&field.variant_position(b))
            .then_with(|| a.cmp(b)),
        (Value::Integer(_) | Value::Long(_), Value::Integer(_) | Value::Long(_)) => {
            a.as_i64().cmp(&b.as_i64())
        }

        _ => Ordering::Equal,
    }
}

/// A validated list of sort keys, ending with the entity's key fields.
///
/// Appending the key makes the order total for records with distinct keys,
/// which keeps consecutive pages from overlapping or skipping rows.
#[derive(Debug, Clone)]
pub struct SortPlan<'r> {
    keys: Vec<(&'r Field, Direction)>,
}

impl<'r> SortPlan<'r> {
    /// Resolves `sorts` against `registry` and appends the key fields not
    /// already present. With no sorts, the order is key-ascending.
    pub fn compile(sorts: &[Sort], registry: &'r FieldRegistry) -> Result<Self> {
        let mut keys = Vec::with_capacity(sorts.len() + 2);
        for sort in sorts {
            let field = registry.resolve(&sort.field)?;
            if keys.iter().all(|(f, _): &(&Field, Direction)| f.name() != field.name()) {
                keys.push((field, sort.direction));
            }
        }

        for field in registry.key_fields() {
            if keys.iter().all(|(f, _)| f.name() != field.name()) {
                keys.push((field, Direction::Ascending));
            }
        }

        Ok(SortPlan { keys })
    }

    /// Field names and directions, primary key first.
    pub fn keys(&self) -> impl Iterator<Item = (&'static str, Direction)> + '_ {
        self.keys.iter().map(|(f, d)| (f.name(), *d))
    }

    /// Compares two records, each key breaking ties left by the previous.
    pub fn compare<E: Entity>(&self, a: &E, b: &E) -> Ordering {
        for (field, direction) in &self.keys {
            let ordering = compare_values(
                field,
                &a.field_value(field.name()),
                &b.field_value(field.name()),
            );
            if ordering != Ordering::Equal {
                return direction.apply(ordering);
            }
        }
        Ordering::Equal
    }
}
