//! Runtime value types for field comparison.
//!
//! [`ValueType`] is the declared type of a registry field. [`Value`] is the
//! runtime value of a field borrowed from a record at evaluation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared type of a queryable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// 128-bit identifier.
    Guid,
    /// UTF-8 string.
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Boolean flag.
    Boolean,
    /// Point in time with offset. Compared as an instant.
    DateTime,
    /// One of a closed set of variant names.
    Enum,
    /// Ordered list of strings.
    StringList,
}

impl ValueType {
    /// Returns `true` if values of this type have a meaningful order for
    /// range comparisons.
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            ValueType::Guid
                | ValueType::String
                | ValueType::Integer
                | ValueType::Long
                | ValueType::DateTime
        )
    }

    /// Returns the display name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Guid => "Guid",
            ValueType::String => "String",
            ValueType::Integer => "Integer",
            ValueType::Long => "Long",
            ValueType::Boolean => "Boolean",
            ValueType::DateTime => "DateTime",
            ValueType::Enum => "Enum",
            ValueType::StringList => "StringList",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value of a field, borrowed from the source record.
///
/// The [`Entity::field_value`](crate::Entity::field_value) accessor returns
/// this type. Absent and null fields are [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Guid(Uuid),
    String(&'a str),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    /// Always normalised to UTC; equality is instant equality.
    DateTime(DateTime<Utc>),
    /// Variant name of an enum field.
    Enum(&'static str),
    StringList(&'a [String]),
    Null,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type of this value, or `None` for `Null`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Guid(_) => Some(ValueType::Guid),
            Value::String(_) => Some(ValueType::String),
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Long(_) => Some(ValueType::Long),
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::DateTime(_) => Some(ValueType::DateTime),
            Value::Enum(_) => Some(ValueType::Enum),
            Value::StringList(_) => Some(ValueType::StringList),
            Value::Null => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the identifier, if present.
    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            Value::Guid(g) => Some(*g),
            _ => None,
        }
    }

    /// Extracts an integer of either width, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the list value, if present.
    pub fn as_list(&self) -> Option<&'a [String]> {
        match self {
            Value::StringList(items) => Some(items),
            _ => None,
        }
    }
}
