//! Tests for the `Entity` and `QueryEnum` derives on the workflow entities.

use chrono::{TimeZone, Utc};
use sieve::entities::{
    Approval, InboxEntry, Process, ProcessParameter, ProcessStatusKind, ProcessTimer, Runtime,
    RuntimeStatus, Scheme, Transition, TransitionClassifier,
};
use sieve::{
    Entity, FieldRegistry, QueryDescriptor, QueryEngine, QueryEnum, Sort, Value, ValueType,
};
use uuid::Uuid;

fn key_names(registry: &FieldRegistry) -> Vec<&'static str> {
    registry.key_fields().map(|f| f.name()).collect()
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn test_field_constants_use_transport_names() {
    assert_eq!(Process::TENANT_ID, "TenantId");
    assert_eq!(Process::CREATION_DATE, "CreationDate");
    assert_eq!(Transition::TRANSITION_CLASSIFIER, "TransitionClassifier");
    assert_eq!(InboxEntry::AVAILABLE_COMMANDS, "AvailableCommands");
    assert_eq!(ProcessTimer::NEXT_EXECUTION_DATE_TIME, "NextExecutionDateTime");
    assert_eq!(Runtime::LAST_ALIVE_SIGNAL, "LastAliveSignal");
    assert_eq!(Approval::SORT, "Sort");
}

// ============================================================================
// Registries
// ============================================================================

#[test]
fn test_registry_entity_names() {
    assert_eq!(Process::registry().entity(), "Process");
    assert_eq!(InboxEntry::registry().entity(), "InboxEntry");
    assert_eq!(ProcessParameter::registry().entity(), "ProcessParameter");
}

#[test]
fn test_single_and_composite_keys() {
    assert_eq!(key_names(Process::registry()), vec!["Id"]);
    assert_eq!(key_names(Scheme::registry()), vec!["Code"]);
    assert_eq!(
        key_names(InboxEntry::registry()),
        vec!["ProcessId", "IdentityId"]
    );
    assert_eq!(
        key_names(ProcessParameter::registry()),
        vec!["ProcessId", "Name"]
    );
}

#[test]
fn test_parent_fields() {
    let parent = |r: &FieldRegistry| r.parent_field().map(|f| f.name());
    assert_eq!(parent(Transition::registry()), Some("ProcessId"));
    assert_eq!(parent(Approval::registry()), Some("ProcessId"));
    assert_eq!(parent(ProcessTimer::registry()), Some("ProcessId"));
    assert_eq!(parent(Process::registry()), None);
    assert_eq!(parent(Runtime::registry()), None);
}

#[test]
fn test_option_fields_are_nullable() {
    let registry = Process::registry();
    assert!(registry.resolve(Process::TENANT_ID).unwrap().is_nullable());
    assert!(registry
        .resolve(Process::LAST_TRANSITION_DATE)
        .unwrap()
        .is_nullable());
    assert!(!registry.resolve(Process::STATE_NAME).unwrap().is_nullable());
}

#[test]
fn test_searchable_fields() {
    let names: Vec<_> = Scheme::registry()
        .searchable_fields()
        .map(|f| f.name())
        .collect();
    assert_eq!(names, vec!["Code", "Tags"]);
}

#[test]
fn test_declared_types() {
    let registry = Transition::registry();
    let ty = |name| registry.resolve(name).unwrap().value_type();
    assert_eq!(ty(Transition::ID), ValueType::Guid);
    assert_eq!(ty(Transition::TRANSITION_TIME), ValueType::DateTime);
    assert_eq!(ty(Transition::IS_FINALISED), ValueType::Boolean);
    assert_eq!(ty(Transition::TRANSITION_DURATION), ValueType::Long);
    assert_eq!(ty(Transition::TRANSITION_CLASSIFIER), ValueType::Enum);
    assert_eq!(
        Scheme::registry()
            .resolve(Scheme::VERSION)
            .unwrap()
            .value_type(),
        ValueType::Integer
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(Process::registry().resolve("Tenant").is_err());
    assert!(Process::registry().get("tenantid").is_none());
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn test_enum_variants_in_declaration_order() {
    assert_eq!(
        RuntimeStatus::VARIANTS,
        &["Alive", "SelfRestore", "Restore", "Dead", "Terminated"]
    );
    assert_eq!(ProcessStatusKind::Idled.variant_name(), "Idled");

    let field = Runtime::registry().resolve(Runtime::STATUS).unwrap();
    assert_eq!(field.variants(), RuntimeStatus::VARIANTS);
    assert_eq!(field.variant_position("Dead"), Some(3));
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_field_value_accessor() {
    let adding_date = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    let entry = InboxEntry {
        process_id: Uuid::from_u128(7),
        identity_id: "ann".into(),
        available_commands: vec!["approve".into(), "reject".into()],
        adding_date,
    };

    assert_eq!(
        entry.field_value(InboxEntry::PROCESS_ID),
        Value::Guid(Uuid::from_u128(7))
    );
    assert_eq!(entry.field_value(InboxEntry::IDENTITY_ID), Value::String("ann"));
    assert_eq!(
        entry.field_value(InboxEntry::AVAILABLE_COMMANDS),
        Value::StringList(&entry.available_commands)
    );
    assert_eq!(
        entry.field_value(InboxEntry::ADDING_DATE),
        Value::DateTime(adding_date)
    );
    assert_eq!(entry.field_value("Unknown"), Value::Null);
}

#[test]
fn test_enum_and_nullable_accessors() {
    let transition = Transition {
        id: Uuid::from_u128(1),
        process_id: Uuid::from_u128(2),
        executor_identity_id: None,
        actor_identity_id: Some("ann".into()),
        from_state_name: None,
        to_state_name: Some("Approved".into()),
        from_activity_name: "Review".into(),
        to_activity_name: "Done".into(),
        trigger_name: Some("approve".into()),
        transition_classifier: TransitionClassifier::Direct,
        transition_time: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        is_finalised: true,
        transition_duration: Some(250),
    };

    assert_eq!(
        transition.field_value(Transition::TRANSITION_CLASSIFIER),
        Value::Enum("Direct")
    );
    assert!(transition
        .field_value(Transition::EXECUTOR_IDENTITY_ID)
        .is_null());
    assert_eq!(
        transition.field_value(Transition::TRANSITION_DURATION),
        Value::Long(250)
    );
    assert_eq!(
        transition.field_value(Transition::IS_FINALISED),
        Value::Boolean(true)
    );
}

#[test]
fn test_records_serialize_with_transport_names() {
    let parameter = ProcessParameter {
        process_id: Uuid::from_u128(1),
        name: "Amount".into(),
        value: Some("100".into()),
    };
    let json = serde_json::to_value(&parameter).unwrap();
    assert_eq!(json[ProcessParameter::NAME], "Amount");
    assert_eq!(json[ProcessParameter::VALUE], "100");
    assert_eq!(
        json[ProcessParameter::PROCESS_ID],
        "00000000-0000-0000-0000-000000000001"
    );
}

// ============================================================================
// Facade paths
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, QueryEnum)]
#[query(crate = "::sieve::query")]
enum Priority {
    Low,
    High,
}

#[derive(Debug, Clone, Entity)]
#[query(entity = "Ticket", crate = "::sieve::query")]
struct Ticket {
    #[query(Long, key)]
    id: i64,

    #[query(Enum)]
    priority: Priority,
}

#[test]
fn test_derives_through_facade_path() {
    assert_eq!(Ticket::registry().entity(), "Ticket");
    assert_eq!(Priority::VARIANTS, &["Low", "High"]);

    let tickets = vec![
        Ticket { id: 1, priority: Priority::High },
        Ticket { id: 2, priority: Priority::Low },
    ];
    let query = QueryDescriptor::new().sort(Sort::asc(Ticket::PRIORITY));
    let page = QueryEngine::default().execute(&query, &tickets).unwrap();
    let ids: Vec<_> = page.collection.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
}
