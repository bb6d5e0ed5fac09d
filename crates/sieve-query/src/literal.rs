//! Owned filter values.
//!
//! A [`Literal`] is the value side of a filter leaf. Unlike [`Value`], which
//! borrows from a record, a literal owns its data so it can live inside a
//! filter tree and travel over the wire.
//!
//! Literals arriving from JSON are loosely typed (a Guid is just a string).
//! [`Literal::coerce`] turns them into the declared type of a field during
//! validation, applying only unambiguous conversions.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::Field;
use crate::value::{Value, ValueType};

/// Owned value stored in a filter leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Guid(Uuid),
    String(String),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    /// Variant name of an enum field.
    Enum(String),
    StringList(Vec<String>),
}

impl Literal {
    /// Returns a short name for the literal's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Guid(_) => "Guid",
            Literal::String(_) => "String",
            Literal::Integer(_) => "Integer",
            Literal::Long(_) => "Long",
            Literal::Boolean(_) => "Boolean",
            Literal::DateTime(_) => "DateTime",
            Literal::Enum(_) => "Enum",
            Literal::StringList(_) => "StringList",
        }
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Integer(n) => Some(i64::from(*n)),
            Literal::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts this literal to the declared type of `field`.
    ///
    /// Accepted conversions: string to Guid, string to DateTime (RFC 3339),
    /// string to Enum (exact variant name), and Integer/Long widening or
    /// in-range narrowing. `Null` is accepted only for nullable fields.
    /// The error is a human readable reason.
    pub fn coerce(&self, field: &Field) -> std::result::Result<Literal, String> {
        if self.is_null() {
            return if field.is_nullable() {
                Ok(Literal::Null)
            } else {
                Err(format!("field '{}' is not nullable", field.name()))
            };
        }

        match (field.value_type(), self) {
            (ValueType::Guid, Literal::Guid(_))
            | (ValueType::String, Literal::String(_))
            | (ValueType::Integer, Literal::Integer(_))
            | (ValueType::Long, Literal::Long(_))
            | (ValueType::Boolean, Literal::Boolean(_))
            | (ValueType::DateTime, Literal::DateTime(_))
            | (ValueType::StringList, Literal::StringList(_)) => Ok(self.clone()),

            (ValueType::Guid, Literal::String(s)) => Uuid::parse_str(s)
                .map(Literal::Guid)
                .map_err(|_| format!("'{s}' is not a valid Guid")),

            (ValueType::Integer, Literal::Long(n)) => i32::try_from(*n)
                .map(Literal::Integer)
                .map_err(|_| format!("{n} is out of range for Integer")),

            (ValueType::Long, Literal::Integer(n)) => Ok(Literal::Long(i64::from(*n))),

            (ValueType::DateTime, Literal::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Literal::DateTime(dt.with_timezone(&Utc)))
                .map_err(|_| format!("'{s}' is not an RFC 3339 date-time")),

            (ValueType::Enum, Literal::Enum(s) | Literal::String(s)) => field
                .variant(s)
                .map(|v| Literal::Enum(v.to_string()))
                .ok_or_else(|| format!("'{s}' is not a variant of '{}'", field.name())),

            (expected, other) => Err(format!("expected {expected} value, got {}", other.kind())),
        }
    }

    /// Field-type-aware equality against a record value.
    ///
    /// Lists compare element-wise in order. Date-times compare as instants.
    /// `Null` equals only `Null`.
    pub fn matches_value(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (Literal::Null, Value::Null) => true,
            (Literal::Guid(a), Value::Guid(b)) => a == b,
            (Literal::String(a), Value::String(b)) => a.as_str() == *b,
            (Literal::Integer(_) | Literal::Long(_), Value::Integer(_) | Value::Long(_)) => {
                self.as_i64() == value.as_i64()
            }
            (Literal::Boolean(a), Value::Boolean(b)) => a == b,
            (Literal::DateTime(a), Value::DateTime(b)) => a == b,
            (Literal::Enum(a), Value::Enum(b)) => a.as_str() == *b,
            (Literal::StringList(a), Value::StringList(b)) => a.as_slice() == *b,
            _ => false,
        }
    }

    /// Orders a record value relative to this literal (`value.cmp(self)`).
    ///
    /// Returns `None` for nulls and unordered or mismatched types.
    pub fn compare_value(&self, value: &Value<'_>) -> Option<Ordering> {
        match (value, self) {
            (Value::Guid(v), Literal::Guid(l)) => Some(v.cmp(l)),
            (Value::String(v), Literal::String(l)) => Some((*v).cmp(l.as_str())),
            (Value::Integer(_) | Value::Long(_), Literal::Integer(_) | Literal::Long(_)) => {
                Some(value.as_i64()?.cmp(&self.as_i64()?))
            }
            (Value::DateTime(v), Literal::DateTime(l)) => Some(v.cmp(l)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LiteralVisitor)
    }
}

struct LiteralVisitor;

impl<'de> Visitor<'de> for LiteralVisitor {
    type Value = Literal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer, boolean, null or list of strings")
    }

    fn visit_unit<E>(self) -> std::result::Result<Literal, E> {
        Ok(Literal::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Literal, E> {
        Ok(Literal::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Literal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Literal::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<Literal, E> {
        Ok(Literal::Boolean(v))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<Literal, E> {
        Ok(Literal::Long(v))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<Literal, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(Literal::Long)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Literal, E> {
        Ok(Literal::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<Literal, E> {
        Ok(Literal::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Literal, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(Literal::StringList(items))
    }
}

// Conversions from common types to Literal

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<Uuid> for Literal {
    fn from(id: Uuid) -> Self {
        Literal::Guid(id)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Integer(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Long(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(dt: DateTime<Utc>) -> Self {
        Literal::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Literal {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Literal::DateTime(dt.with_timezone(&Utc))
    }
}

impl From<Vec<String>> for Literal {
    fn from(items: Vec<String>) -> Self {
        Literal::StringList(items)
    }
}

impl From<Vec<&str>> for Literal {
    fn from(items: Vec<&str>) -> Self {
        Literal::StringList(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const STATUSES: &[&str] = &["Alive", "Dead"];

    #[test]
    fn string_coerces_to_guid() {
        let field = Field::new("Id", ValueType::Guid);
        let id = Uuid::from_u128(42);

        let coerced = Literal::from(id.to_string()).coerce(&field).unwrap();
        assert_eq!(coerced, Literal::Guid(id));

        let err = Literal::from("not-a-guid").coerce(&field).unwrap_err();
        assert!(err.contains("not a valid Guid"));
    }

    #[test]
    fn string_coerces_to_datetime_instant() {
        let field = Field::new("CreationDate", ValueType::DateTime);
        let coerced = Literal::from("2024-05-01T12:00:00+02:00")
            .coerce(&field)
            .unwrap();
        assert_eq!(
            coerced,
            Literal::DateTime(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn enum_requires_known_variant() {
        let field = Field::new("Status", ValueType::Enum).with_variants(STATUSES);

        assert_eq!(
            Literal::from("Alive").coerce(&field).unwrap(),
            Literal::Enum("Alive".to_string())
        );
        assert!(Literal::from("alive").coerce(&field).is_err());
    }

    #[test]
    fn integers_widen_and_narrow_in_range() {
        let int_field = Field::new("Version", ValueType::Integer);
        let long_field = Field::new("Sort", ValueType::Long);

        assert_eq!(
            Literal::Long(5).coerce(&int_field).unwrap(),
            Literal::Integer(5)
        );
        assert!(Literal::Long(i64::MAX).coerce(&int_field).is_err());
        assert_eq!(
            Literal::Integer(5).coerce(&long_field).unwrap(),
            Literal::Long(5)
        );
    }

    #[test]
    fn null_requires_nullable_field() {
        let required = Field::new("Name", ValueType::String);
        let optional = Field::new("TenantId", ValueType::String).nullable();

        assert!(Literal::Null.coerce(&required).is_err());
        assert_eq!(Literal::Null.coerce(&optional).unwrap(), Literal::Null);
    }

    #[test]
    fn mismatched_kind_is_rejected() {
        let field = Field::new("IsDeleted", ValueType::Boolean);
        let err = Literal::from("true").coerce(&field).unwrap_err();
        assert_eq!(err, "expected Boolean value, got String");
    }

    #[test]
    fn list_equality_is_ordered() {
        let stored = vec!["approve".to_string(), "reject".to_string()];
        let value = Value::StringList(&stored);

        assert!(Literal::from(vec!["approve", "reject"]).matches_value(&value));
        assert!(!Literal::from(vec!["reject", "approve"]).matches_value(&value));
        assert!(!Literal::from(vec!["approve"]).matches_value(&value));
    }

    #[test]
    fn null_equals_only_null() {
        assert!(Literal::Null.matches_value(&Value::Null));
        assert!(!Literal::Null.matches_value(&Value::String("")));
        assert!(!Literal::from("").matches_value(&Value::Null));
    }

    #[test]
    fn mixed_width_integers_compare() {
        assert!(Literal::Long(3).matches_value(&Value::Integer(3)));
        assert_eq!(
            Literal::Integer(3).compare_value(&Value::Long(5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Literal::Integer(3).compare_value(&Value::Null), None);
    }

    #[test]
    fn deserializes_loosely_typed_json() {
        let lit: Literal = serde_json::from_str("null").unwrap();
        assert_eq!(lit, Literal::Null);

        let lit: Literal = serde_json::from_str("42").unwrap();
        assert_eq!(lit, Literal::Long(42));

        let lit: Literal = serde_json::from_str("-7").unwrap();
        assert_eq!(lit, Literal::Long(-7));

        let lit: Literal = serde_json::from_str("true").unwrap();
        assert_eq!(lit, Literal::Boolean(true));

        let lit: Literal = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(lit, Literal::from(vec!["a", "b"]));

        assert!(serde_json::from_str::<Literal>("1.5").is_err());
        assert!(serde_json::from_str::<Literal>("[1, 2]").is_err());
    }

    #[test]
    fn serializes_as_plain_json() {
        let id = Uuid::from_u128(1);
        assert_eq!(
            serde_json::to_string(&Literal::Guid(id)).unwrap(),
            format!("\"{id}\"")
        );
        assert_eq!(serde_json::to_string(&Literal::Null).unwrap(), "null");
    }
}
