//! Validated, compiled predicates.
//!
//! [`Predicate::compile`] checks a [`Filter`] against a [`FieldRegistry`]
//! and produces a tree whose fields are resolved, whose literals carry the
//! field's declared type and whose patterns are compiled. Validation is
//! fail-fast: the first invalid node aborts compilation.
//!
//! Evaluation is a single recursive match over the compiled tree:
//!
//! ```text
//! And([])  = true        Or([])  = false
//! And(cs)  = every child matches
//! Or(cs)   = some child matches
//! Not(c)   = !c
//! ```
//!
//! A leaf comparing a null record value is false, except `Equal(f, null)`.
//! `Not` is plain negation, so `Not(Equal(f, v))` matches nulls.

use regex::Regex;
use tracing::trace;

use crate::error::{QueryError, Result};
use crate::filter::Filter;
use crate::literal::Literal;
use crate::op::Op;
use crate::registry::{Field, FieldRegistry};
use crate::traits::Entity;
use crate::value::{Value, ValueType};

/// A validated predicate over one entity's records.
#[derive(Debug, Clone)]
pub enum Predicate {
    Equal {
        field: &'static str,
        value: Literal,
    },
    In {
        field: &'static str,
        values: Vec<Literal>,
    },
    /// Substring of a string value, or of any element of a list.
    Contains {
        field: &'static str,
        needle: String,
        ignore_case: bool,
    },
    /// List has an element equal to `item`.
    Includes {
        field: &'static str,
        item: String,
    },
    StartsWith {
        field: &'static str,
        prefix: String,
    },
    Compare {
        field: &'static str,
        op: Op,
        value: Literal,
    },
    Matches {
        field: &'static str,
        regex: Regex,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// A predicate matching every record.
    pub fn always() -> Self {
        Predicate::And(Vec::new())
    }

    /// A predicate matching no record.
    pub fn never() -> Self {
        Predicate::Or(Vec::new())
    }

    /// Validates `filter` against `registry` and compiles it.
    pub fn compile(filter: &Filter, registry: &FieldRegistry) -> Result<Predicate> {
        let predicate = match filter {
            Filter::Equal { field, value } => {
                let field = leaf_field(registry, field, Op::Equal)?;
                Predicate::Equal {
                    field: field.name(),
                    value: coerce(field, Op::Equal, value)?,
                }
            }

            Filter::In { field, values } => {
                let field = leaf_field(registry, field, Op::In)?;
                let values = values
                    .iter()
                    .map(|v| coerce(field, Op::In, v))
                    .collect::<Result<Vec<_>>>()?;
                Predicate::In {
                    field: field.name(),
                    values,
                }
            }

            Filter::Contains { field, value } => {
                let field = leaf_field(registry, field, Op::Contains)?;
                match field.value_type() {
                    ValueType::StringList => Predicate::Includes {
                        field: field.name(),
                        item: value.clone(),
                    },
                    _ => Predicate::Contains {
                        field: field.name(),
                        needle: value.clone(),
                        ignore_case: false,
                    },
                }
            }

            Filter::StartsWith { field, value } => {
                let field = leaf_field(registry, field, Op::StartsWith)?;
                Predicate::StartsWith {
                    field: field.name(),
                    prefix: value.clone(),
                }
            }

            Filter::Greater { field, value }
            | Filter::GreaterOrEqual { field, value }
            | Filter::Less { field, value }
            | Filter::LessOrEqual { field, value } => {
                let op = filter.op();
                let field = leaf_field(registry, field, op)?;
                if value.is_null() {
                    return Err(QueryError::InvalidValue {
                        field: field.name().to_string(),
                        op,
                        reason: "null cannot be compared by order".to_string(),
                    });
                }
                Predicate::Compare {
                    field: field.name(),
                    op,
                    value: coerce(field, op, value)?,
                }
            }

            Filter::Matches { field, pattern } => {
                let field = leaf_field(registry, field, Op::Matches)?;
                let regex = Regex::new(pattern).map_err(|e| QueryError::InvalidValue {
                    field: field.name().to_string(),
                    op: Op::Matches,
                    reason: e.to_string(),
                })?;
                Predicate::Matches {
                    field: field.name(),
                    regex,
                }
            }

            Filter::And { children } => Predicate::And(compile_all(children, registry)?),

            Filter::Or { children } => Predicate::Or(compile_all(children, registry)?),

            Filter::Not { children } => match children.as_slice() {
                [child] => Predicate::Not(Box::new(Predicate::compile(child, registry)?)),
                _ => {
                    return Err(QueryError::MalformedFilter {
                        op: Op::Not,
                        reason: format!("expected exactly one child, found {}", children.len()),
                    })
                }
            },
        };

        trace!(entity = registry.entity(), op = %filter.op(), "validated filter node");
        Ok(predicate)
    }

    /// Builds the implicit predicate for a free-text search term.
    ///
    /// The term is matched against every searchable field and the results
    /// are combined with `Or`:
    /// - `String`, `StringList`: substring (any element for lists)
    /// - `Guid`, `Integer`, `Long`, `DateTime`: exact match if the term parses
    /// - `Enum`: exact variant name
    /// - `Boolean`: not searched
    ///
    /// An entity without searchable fields yields a predicate that matches
    /// nothing, so a search term never widens a query.
    pub fn search(term: &str, registry: &FieldRegistry, ignore_case: bool) -> Predicate {
        let needle = if ignore_case {
            term.to_lowercase()
        } else {
            term.to_string()
        };

        let alternatives = registry
            .searchable_fields()
            .filter_map(|field| search_field(field, term, &needle, ignore_case))
            .collect();

        Predicate::Or(alternatives)
    }

    /// Evaluates the predicate against a record.
    pub fn matches<E: Entity + ?Sized>(&self, record: &E) -> bool {
        match self {
            Predicate::Equal { field, value } => value.matches_value(&record.field_value(field)),

            Predicate::In { field, values } => {
                let actual = record.field_value(field);
                values.iter().any(|v| v.matches_value(&actual))
            }

            Predicate::Contains {
                field,
                needle,
                ignore_case,
            } => {
                let hit = |s: &str| {
                    if *ignore_case {
                        s.to_lowercase().contains(needle.as_str())
                    } else {
                        s.contains(needle.as_str())
                    }
                };
                match record.field_value(field) {
                    Value::String(s) => hit(s),
                    Value::StringList(items) => items.iter().any(|s| hit(s.as_str())),
                    _ => false,
                }
            }

            Predicate::Includes { field, item } => match record.field_value(field) {
                Value::StringList(items) => items.iter().any(|s| s == item),
                _ => false,
            },

            Predicate::StartsWith { field, prefix } => match record.field_value(field) {
                Value::String(s) => s.starts_with(prefix.as_str()),
                Value::StringList(items) => items.iter().any(|s| s.starts_with(prefix.as_str())),
                _ => false,
            },

            Predicate::Compare { field, op, value } => value
                .compare_value(&record.field_value(field))
                .is_some_and(|ordering| op.eval_ordering(ordering)),

            Predicate::Matches { field, regex } => match record.field_value(field) {
                Value::String(s) => regex.is_match(s),
                _ => false,
            },

            Predicate::And(children) => children.iter().all(|c| c.matches(record)),

            Predicate::Or(children) => children.iter().any(|c| c.matches(record)),

            Predicate::Not(child) => !child.matches(record),
        }
    }
}

fn leaf_field<'r>(registry: &'r FieldRegistry, name: &str, op: Op) -> Result<&'r Field> {
    let field = registry.resolve(name)?;
    if !op.accepts(field.value_type()) {
        return Err(QueryError::InvalidValue {
            field: field.name().to_string(),
            op,
            reason: format!("operator not supported for {} fields", field.value_type()),
        });
    }
    Ok(field)
}

fn coerce(field: &Field, op: Op, value: &Literal) -> Result<Literal> {
    value
        .coerce(field)
        .map_err(|reason| QueryError::InvalidValue {
            field: field.name().to_string(),
            op,
            reason,
        })
}

fn compile_all(children: &[Filter], registry: &FieldRegistry) -> Result<Vec<Predicate>> {
    children
        .iter()
        .map(|child| Predicate::compile(child, registry))
        .collect()
}

fn search_field(field: &Field, term: &str, needle: &str, ignore_case: bool) -> Option<Predicate> {
    match field.value_type() {
        ValueType::String | ValueType::StringList => Some(Predicate::Contains {
            field: field.name(),
            needle: needle.to_string(),
            ignore_case,
        }),
        ValueType::Boolean => None,
        ValueType::Integer | ValueType::Long => {
            let n: i64 = term.trim().parse().ok()?;
            exact(field, Literal::Long(n))
        }
        _ => exact(field, Literal::from(term.trim())),
    }
}

fn exact(field: &Field, literal: Literal) -> Option<Predicate> {
    literal.coerce(field).ok().map(|value| Predicate::Equal {
        field: field.name(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use uuid::Uuid;

    use crate::traits::AsValue;

    #[derive(Debug)]
    struct Runtime {
        id: String,
        lock: Uuid,
        status: &'static str,
        restorer_id: Option<String>,
        tags: Vec<String>,
        attempts: i32,
    }

    impl Entity for Runtime {
        fn registry() -> &'static FieldRegistry {
            static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                FieldRegistry::builder("Runtime")
                    .field(Field::new("Id", ValueType::String).key().searchable())
                    .field(Field::new("Lock", ValueType::Guid).searchable())
                    .field(
                        Field::new("Status", ValueType::Enum)
                            .with_variants(&["Alive", "Dead"])
                            .searchable(),
                    )
                    .field(Field::new("RestorerId", ValueType::String).nullable())
                    .field(Field::new("Tags", ValueType::StringList).searchable())
                    .field(Field::new("Attempts", ValueType::Integer))
                    .build()
            })
        }

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "Id" => self.id.as_value(),
                "Lock" => self.lock.as_value(),
                "Status" => Value::Enum(self.status),
                "RestorerId" => self.restorer_id.as_value(),
                "Tags" => self.tags.as_value(),
                "Attempts" => self.attempts.as_value(),
                _ => Value::Null,
            }
        }
    }

    fn runtime() -> Runtime {
        Runtime {
            id: "node-A".to_string(),
            lock: Uuid::from_u128(9),
            status: "Alive",
            restorer_id: None,
            tags: vec!["east".to_string(), "primary".to_string()],
            attempts: 3,
        }
    }

    fn compile(filter: Filter) -> Result<Predicate> {
        Predicate::compile(&filter, Runtime::registry())
    }

    #[test]
    fn identity_elements() {
        let r = runtime();
        assert!(compile(Filter::and([])).unwrap().matches(&r));
        assert!(!compile(Filter::or([])).unwrap().matches(&r));
        assert!(Predicate::always().matches(&r));
        assert!(!Predicate::never().matches(&r));
    }

    #[test]
    fn equal_coerces_guid_strings() {
        let r = runtime();
        let p = compile(Filter::equal("Lock", Uuid::from_u128(9).to_string())).unwrap();
        assert!(p.matches(&r));
    }

    #[test]
    fn invalid_guid_is_rejected_not_unmatched() {
        let err = compile(Filter::equal("Lock", "nine")).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { op: Op::Equal, .. }));
    }

    #[test]
    fn in_checks_every_element() {
        let err = compile(Filter::one_of("Status", ["Alive", "Zombie"])).unwrap_err();
        match err {
            QueryError::InvalidValue { field, op, .. } => {
                assert_eq!(field, "Status");
                assert_eq!(op, Op::In);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_in_matches_nothing() {
        let p = compile(Filter::one_of("Id", Vec::<String>::new())).unwrap();
        assert!(!p.matches(&runtime()));
    }

    #[test]
    fn not_requires_one_child() {
        let err = compile(Filter::Not { children: vec![] }).unwrap_err();
        assert!(matches!(err, QueryError::MalformedFilter { op: Op::Not, .. }));

        let err = compile(Filter::Not {
            children: vec![Filter::and([]), Filter::and([])],
        })
        .unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn validation_is_fail_fast_and_recursive() {
        let err = compile(Filter::or([
            Filter::equal("Id", "node-A"),
            Filter::and([Filter::equal("Missing", 1)]),
        ]))
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn null_semantics() {
        let r = runtime();
        assert!(compile(Filter::equal("RestorerId", Literal::Null))
            .unwrap()
            .matches(&r));
        assert!(!compile(Filter::equal("RestorerId", "node-B"))
            .unwrap()
            .matches(&r));
        assert!(compile(Filter::not(Filter::equal("RestorerId", "node-B")))
            .unwrap()
            .matches(&r));
        assert!(compile(Filter::equal("Id", Literal::Null)).is_err());
    }

    #[test]
    fn operator_type_mismatch() {
        let err = compile(Filter::contains("Lock", "9")).unwrap_err();
        assert!(err.to_string().contains("not supported for Guid"));

        let err = compile(Filter::greater("Status", "Alive")).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { .. }));
    }

    #[test]
    fn range_comparisons() {
        let r = runtime();
        assert!(compile(Filter::greater("Attempts", 2)).unwrap().matches(&r));
        assert!(!compile(Filter::greater("Attempts", 3)).unwrap().matches(&r));
        assert!(compile(Filter::less_or_equal("Attempts", 3i64))
            .unwrap()
            .matches(&r));
        assert!(compile(Filter::greater("Attempts", Literal::Null)).is_err());
    }

    #[test]
    fn text_operators_on_lists() {
        let r = runtime();
        assert!(compile(Filter::contains("Tags", "primary")).unwrap().matches(&r));
        assert!(!compile(Filter::contains("Tags", "prim")).unwrap().matches(&r));
        assert!(!compile(Filter::contains("Tags", "PRIMARY")).unwrap().matches(&r));
        assert!(compile(Filter::starts_with("Tags", "ea")).unwrap().matches(&r));
        assert!(compile(Filter::contains("Id", "ode")).unwrap().matches(&r));
    }

    #[test]
    fn regex_leaf() {
        let r = runtime();
        assert!(compile(Filter::matches("Id", r"^node-[A-Z]$"))
            .unwrap()
            .matches(&r));
        let err = compile(Filter::matches("Id", "(")).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { op: Op::Matches, .. }));
    }

    #[test]
    fn search_spans_searchable_fields() {
        let r = runtime();
        let registry = Runtime::registry();

        assert!(Predicate::search("NODE", registry, true).matches(&r));
        assert!(!Predicate::search("NODE", registry, false).matches(&r));
        assert!(Predicate::search("primary", registry, true).matches(&r));
        assert!(Predicate::search(&Uuid::from_u128(9).to_string(), registry, true).matches(&r));
        assert!(Predicate::search("Alive", registry, false).matches(&r));
        assert!(!Predicate::search(" 3 ", registry, true).matches(&r));
        assert!(!Predicate::search("nothing-like-it", registry, true).matches(&r));
    }
}
