//! Property-based tests for sieve-query using proptest.

use std::collections::HashSet;
use std::sync::OnceLock;

use proptest::prelude::*;
use sieve_query::{
    AsValue, Entity, Field, FieldRegistry, Filter, Literal, QueryDescriptor, QueryEngine, Sort,
    Value, ValueType,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: i64,
    state: String,
    priority: i32,
    active: bool,
    owner: Option<String>,
}

impl Entity for Item {
    fn registry() -> &'static FieldRegistry {
        static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::builder("Item")
                .field(Field::new("Id", ValueType::Long).key())
                .field(Field::new("State", ValueType::String))
                .field(Field::new("Priority", ValueType::Integer))
                .field(Field::new("Active", ValueType::Boolean))
                .field(Field::new("Owner", ValueType::String).nullable())
                .build()
        })
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "Id" => self.id.as_value(),
            "State" => self.state.as_value(),
            "Priority" => self.priority.as_value(),
            "Active" => self.active.as_value(),
            "Owner" => self.owner.as_value(),
            _ => Value::Null,
        }
    }
}

const STATES: [&str; 4] = ["Draft", "Review", "Approved", "Closed"];

// Items with distinct ids, so the key tiebreak gives a total order.
fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            0usize..STATES.len(),
            -5i32..5,
            any::<bool>(),
            prop::option::of("[a-c]{1,2}"),
        ),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (state, priority, active, owner))| Item {
                id: i as i64,
                state: STATES[state].to_string(),
                priority,
                active,
                owner,
            })
            .collect()
    })
}

fn leaf_strategy() -> impl Strategy<Value = Filter> {
    prop_oneof![
        (0usize..STATES.len()).prop_map(|i| Filter::equal("State", STATES[i])),
        (-5i32..5).prop_map(|p| Filter::equal("Priority", p)),
        (-5i32..5).prop_map(|p| Filter::greater_or_equal("Priority", p)),
        any::<bool>().prop_map(|b| Filter::equal("Active", b)),
        prop::option::of("[a-c]{1,2}").prop_map(|o| Filter::equal("Owner", Literal::from(o))),
    ]
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    leaf_strategy().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Filter::and),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Filter::or),
            inner.prop_map(Filter::not),
        ]
    })
}

fn all_ids(engine: &QueryEngine, filter: Filter, items: &[Item]) -> Vec<i64> {
    let descriptor = QueryDescriptor::new().filter(filter).take(1000);
    engine
        .execute(&descriptor, items)
        .unwrap()
        .collection
        .iter()
        .map(|item| item.id)
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Not(And(a, b)) selects the same records as Or(Not(a), Not(b)).
    #[test]
    fn de_morgan_and(items in items_strategy(), a in filter_strategy(), b in filter_strategy()) {
        let engine = QueryEngine::default();
        let left = all_ids(&engine, Filter::not(Filter::and([a.clone(), b.clone()])), &items);
        let right = all_ids(&engine, Filter::or([Filter::not(a), Filter::not(b)]), &items);
        prop_assert_eq!(left, right);
    }

    /// Not(Or(a, b)) selects the same records as And(Not(a), Not(b)).
    #[test]
    fn de_morgan_or(items in items_strategy(), a in filter_strategy(), b in filter_strategy()) {
        let engine = QueryEngine::default();
        let left = all_ids(&engine, Filter::not(Filter::or([a.clone(), b.clone()])), &items);
        let right = all_ids(&engine, Filter::and([Filter::not(a), Filter::not(b)]), &items);
        prop_assert_eq!(left, right);
    }

    /// In(f, vs) selects the same records as Or(Equal(f, v) for v in vs).
    #[test]
    fn in_is_or_of_equals(
        items in items_strategy(),
        picks in prop::collection::vec(0usize..STATES.len(), 0..4),
    ) {
        let engine = QueryEngine::default();
        let values: Vec<&str> = picks.iter().map(|&i| STATES[i]).collect();
        let in_ids = all_ids(&engine, Filter::one_of("State", values.clone()), &items);
        let or_ids = all_ids(
            &engine,
            Filter::or(values.into_iter().map(|v| Filter::equal("State", v))),
            &items,
        );
        prop_assert_eq!(in_ids, or_ids);
    }

    /// A filter and its negation partition the collection.
    #[test]
    fn filter_and_negation_partition(items in items_strategy(), f in filter_strategy()) {
        let engine = QueryEngine::default();
        let kept = all_ids(&engine, f.clone(), &items);
        let dropped = all_ids(&engine, Filter::not(f), &items);
        prop_assert_eq!(kept.len() + dropped.len(), items.len());
        let kept: HashSet<_> = kept.into_iter().collect();
        prop_assert!(dropped.iter().all(|id| !kept.contains(id)));
    }

    /// An empty descriptor returns every record.
    #[test]
    fn empty_query_matches_all(items in items_strategy()) {
        let page = QueryEngine::default()
            .execute(&QueryDescriptor::new().take(1000), &items)
            .unwrap();
        prop_assert_eq!(page.total, items.len());
        prop_assert_eq!(page.len(), items.len());
    }

    /// Consecutive pages cover every match exactly once, and every page
    /// reports the same total.
    #[test]
    fn pages_cover_matches_exactly_once(
        items in items_strategy(),
        f in filter_strategy(),
        take in 1i64..12,
        descending in any::<bool>(),
    ) {
        let engine = QueryEngine::default();
        let sort = if descending { Sort::desc("Priority") } else { Sort::asc("State") };
        let base = QueryDescriptor::new().filter(f).sort(sort).take(take);
        let total = engine.execute(&base, &items).unwrap().total;

        let mut seen = Vec::new();
        let mut skip = 0;
        loop {
            let page = engine.execute(&base.clone().skip(skip), &items).unwrap();
            prop_assert_eq!(page.total, total);
            if page.is_empty() {
                break;
            }
            seen.extend(page.collection.iter().map(|item| item.id));
            skip += take;
        }

        let unique: HashSet<_> = seen.iter().copied().collect();
        prop_assert_eq!(seen.len(), total);
        prop_assert_eq!(unique.len(), total);
    }

    /// count equals the total reported by a page.
    #[test]
    fn count_equals_total(items in items_strategy(), f in filter_strategy()) {
        let engine = QueryEngine::default();
        let descriptor = QueryDescriptor::new().filter(f).take(1);
        let page = engine.execute(&descriptor, &items).unwrap();
        let counted = engine.count::<Item, _>(&items, &descriptor).unwrap();
        prop_assert_eq!(page.total, counted);
    }

    /// A page is never larger than take.
    #[test]
    fn take_respects_bound(items in items_strategy(), take in 1i64..50, skip in 0i64..80) {
        let page = QueryEngine::default()
            .execute(&QueryDescriptor::new().skip(skip).take(take), &items)
            .unwrap();
        prop_assert!(page.len() as i64 <= take);
        prop_assert_eq!(page.total, items.len());
    }
}
