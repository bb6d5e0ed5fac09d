//! Field registry.
//!
//! A [`FieldRegistry`] declares the closed set of queryable fields of one
//! entity type. Filters, sorts and search terms are validated against it
//! before any record is read.
//!
//! Registries are built once and never mutated, so a `&'static` registry can
//! be shared by any number of concurrent evaluations.
//!
//! # Example
//!
//! ```
//! use sieve_query::{Field, FieldRegistry, ValueType};
//!
//! let registry = FieldRegistry::builder("Process")
//!     .field(Field::new("Id", ValueType::Guid).key())
//!     .field(Field::new("TenantId", ValueType::String).nullable())
//!     .field(Field::new("StateName", ValueType::String).searchable())
//!     .build();
//!
//! assert!(registry.resolve("TenantId").is_ok());
//! assert!(registry.resolve("tenantid").is_err());
//! assert_eq!(registry.key_fields().count(), 1);
//! ```

use std::collections::HashMap;

use crate::error::{QueryError, Result};
use crate::value::ValueType;

/// A named, typed, queryable attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    value_type: ValueType,
    nullable: bool,
    key: bool,
    parent: bool,
    searchable: bool,
    variants: &'static [&'static str],
}

impl Field {
    /// Creates a required, non-key field.
    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Field {
            name,
            value_type,
            nullable: false,
            key: false,
            parent: false,
            searchable: false,
            variants: &[],
        }
    }

    /// Marks the field as accepting null values.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the field as part of the entity's primary key.
    pub const fn key(mut self) -> Self {
        self.key = true;
        self
    }

    /// Marks the field as the key of the parent collection.
    pub const fn parent(mut self) -> Self {
        self.parent = true;
        self
    }

    /// Includes the field in implicit free-text search.
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Sets the variant names of an `Enum` field, in declaration order.
    pub const fn with_variants(mut self, variants: &'static [&'static str]) -> Self {
        self.variants = variants;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_key(&self) -> bool {
        self.key
    }

    pub fn is_parent(&self) -> bool {
        self.parent
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Looks up a variant by exact name.
    pub fn variant(&self, name: &str) -> Option<&'static str> {
        self.variants.iter().copied().find(|v| *v == name)
    }

    /// Returns the declaration index of a variant, used for ordering.
    pub fn variant_position(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| *v == name)
    }
}

/// The closed set of queryable fields of one entity type.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entity: &'static str,
    fields: Vec<Field>,
    index: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    /// Starts building a registry for the named entity.
    pub fn builder(entity: &'static str) -> RegistryBuilder {
        RegistryBuilder {
            entity,
            fields: Vec::new(),
        }
    }

    /// Returns the entity name.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Resolves a field by its exact name.
    ///
    /// Field names are case sensitive; no fuzzy matching is attempted.
    pub fn resolve(&self, name: &str) -> Result<&Field> {
        self.get(name).ok_or_else(|| QueryError::UnknownField {
            entity: self.entity,
            field: name.to_string(),
        })
    }

    /// Returns the field with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Returns the declared type of a field.
    pub fn type_of(&self, field: &Field) -> ValueType {
        field.value_type()
    }

    /// Returns all fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the fields taking part in free-text search, in declaration order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_searchable())
    }

    /// Returns the primary key fields, in declaration order.
    pub fn key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_key())
    }

    /// Returns the field holding the parent collection key, if any.
    pub fn parent_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_parent())
    }
}

/// Builder for [`FieldRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    entity: &'static str,
    fields: Vec<Field>,
}

impl RegistryBuilder {
    /// Adds a field. Names must be unique; a repeated name is ignored.
    pub fn field(mut self, field: Field) -> Self {
        if self.fields.iter().all(|f| f.name != field.name) {
            self.fields.push(field);
        }
        self
    }

    /// Finalizes the registry.
    ///
    /// If no field was marked searchable, every `String` and `StringList`
    /// field becomes searchable.
    pub fn build(mut self) -> FieldRegistry {
        if !self.fields.iter().any(|f| f.searchable) {
            for field in &mut self.fields {
                if matches!(field.value_type, ValueType::String | ValueType::StringList) {
                    field.searchable = true;
                }
            }
        }

        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name, i))
            .collect();

        FieldRegistry {
            entity: self.entity,
            fields: self.fields,
            index,
        }
    }
}
