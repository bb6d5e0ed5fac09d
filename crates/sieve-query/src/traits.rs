//! Traits for derive macro support.
//!
//! [`Entity`] is implemented by `#[derive(Entity)]` from `sieve-macros` to
//! expose a record type's field registry and typed field access.
//! [`AsValue`] and [`QueryEnum`] convert individual field types.

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::registry::FieldRegistry;
use crate::value::Value;

/// A record type that can be filtered, sorted and paged.
///
/// # Manual Implementation
///
/// ```
/// use std::sync::OnceLock;
/// use sieve_query::{AsValue, Entity, Field, FieldRegistry, Value, ValueType};
///
/// struct Parameter {
///     name: String,
///     value: Option<String>,
/// }
///
/// impl Entity for Parameter {
///     fn registry() -> &'static FieldRegistry {
///         static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
///         REGISTRY.get_or_init(|| {
///             FieldRegistry::builder("Parameter")
///                 .field(Field::new("Name", ValueType::String).key())
///                 .field(Field::new("Value", ValueType::String).nullable())
///                 .build()
///         })
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "Name" => self.name.as_value(),
///             "Value" => self.value.as_value(),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let p = Parameter { name: "Amount".into(), value: None };
/// assert_eq!(p.field_value("Name"), Value::String("Amount"));
/// assert!(p.field_value("Value").is_null());
/// ```
pub trait Entity {
    /// Returns the entity's field registry, built once per process.
    fn registry() -> &'static FieldRegistry;

    /// Returns the value of a registered field, or [`Value::Null`] for null
    /// values and unknown names.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Free-function form of [`Entity::field_value`].
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Conversion of a field type into a borrowed [`Value`].
pub trait AsValue {
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for Uuid {
    fn as_value(&self) -> Value<'_> {
        Value::Guid(*self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for i32 {
    fn as_value(&self) -> Value<'_> {
        Value::Integer(*self)
    }
}

impl AsValue for i64 {
    fn as_value(&self) -> Value<'_> {
        Value::Long(*self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Boolean(*self)
    }
}

impl AsValue for DateTime<Utc> {
    fn as_value(&self) -> Value<'_> {
        Value::DateTime(*self)
    }
}

impl AsValue for DateTime<FixedOffset> {
    fn as_value(&self) -> Value<'_> {
        Value::DateTime(self.with_timezone(&Utc))
    }
}

impl AsValue for Vec<String> {
    fn as_value(&self) -> Value<'_> {
        Value::StringList(self)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
}

/// Enum types usable as `Enum` fields.
///
/// Usually derived with `#[derive(QueryEnum)]`. Variant names are the
/// transport-level spelling and must be stable.
///
/// # Example
///
/// ```
/// use sieve_query::QueryEnum;
///
/// #[derive(Clone, Copy)]
/// enum RuntimeStatus {
///     Alive,
///     Dead,
/// }
///
/// impl QueryEnum for RuntimeStatus {
///     const VARIANTS: &'static [&'static str] = &["Alive", "Dead"];
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             RuntimeStatus::Alive => "Alive",
///             RuntimeStatus::Dead => "Dead",
///         }
///     }
/// }
///
/// assert_eq!(RuntimeStatus::Dead.variant_name(), "Dead");
/// ```
pub trait QueryEnum {
    /// Variant names in declaration order. Sorting follows this order.
    const VARIANTS: &'static [&'static str];

    /// Returns the name of this variant.
    fn variant_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn option_maps_none_to_null() {
        let some: Option<i64> = Some(4);
        let none: Option<i64> = None;
        assert_eq!(some.as_value(), Value::Long(4));
        assert_eq!(none.as_value(), Value::Null);
    }

    #[test]
    fn fixed_offset_normalises_to_utc() {
        let local = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 3, 0, 0)
            .unwrap();
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(local.as_value(), Value::DateTime(utc));
    }

    #[test]
    fn list_borrows() {
        let commands = vec!["approve".to_string()];
        assert_eq!(commands.as_value(), Value::StringList(&commands));
    }
}
