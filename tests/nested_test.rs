//! Nested schemas, lists of nested schemas, and registry wiring.

use alembic::fields::{IntegerField, ListField, NestedField, StringField};
use alembic::{Schema, SchemaRegistry};
use serde_json::json;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

fn address_schema() -> Schema {
    Schema::new()
        .field("street", StringField::new().required().min_len(1))
        .field("city", StringField::new().required().min_len(1))
}

#[test]
fn test_deeply_nested_paths() {
    let inner = Schema::new().field("value", IntegerField::new().required().min(0));
    let middle = Schema::new().field("inner", NestedField::new(inner).required());
    let outer = Schema::new().field("middle", NestedField::new(middle).required());

    let errors = unwrap_failure(outer.load(&json!({
        "middle": {"inner": {"value": -5}}
    })));
    assert_eq!(errors.first().path.to_string(), "middle.inner.value");
}

#[test]
fn test_nested_accumulates_with_parent_errors() {
    let schema = Schema::new()
        .field("name", StringField::new().required())
        .field("address", NestedField::new(address_schema()).required());

    let errors = unwrap_failure(schema.load(&json!({
        "address": {"street": ""}
    })));
    let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["name", "address.street", "address.city"]);
}

#[test]
fn test_list_of_nested_schemas() {
    let schema = Schema::new().field(
        "addresses",
        ListField::new(NestedField::new(address_schema())),
    );

    let out = schema
        .load(&json!({
            "addresses": [
                {"street": "Main St", "city": "Springfield"},
                {"street": "Oak Ave", "city": "Shelbyville"}
            ]
        }))
        .into_result()
        .unwrap();
    assert_eq!(out["addresses"][1]["city"], json!("Shelbyville"));
}

#[test]
fn test_list_of_nested_error_paths_include_index() {
    let schema = Schema::new().field(
        "addresses",
        ListField::new(NestedField::new(address_schema())),
    );

    let errors = unwrap_failure(schema.load(&json!({
        "addresses": [
            {"street": "Main St", "city": "Springfield"},
            {"street": "Oak Ave"}
        ]
    })));
    assert_eq!(errors.first().path.to_string(), "addresses[1].city");
}

#[test]
fn test_registry_wires_nested_fields() {
    let registry = SchemaRegistry::new();
    registry.register("Address", address_schema()).unwrap();
    registry
        .register(
            "User",
            Schema::new()
                .field("name", StringField::new().required())
                .field(
                    "address",
                    NestedField::new(registry.expect("Address").unwrap()).required(),
                ),
        )
        .unwrap();

    let user = registry.expect("User").unwrap();
    let out = user
        .load(&json!({
            "name": "Alice",
            "address": {"street": "Main St", "city": "Springfield"}
        }))
        .into_result()
        .unwrap();
    assert_eq!(out["address"]["city"], json!("Springfield"));
}

#[test]
fn test_registry_schema_shared_between_parents() {
    let registry = SchemaRegistry::new();
    registry.register("Address", address_schema()).unwrap();
    let address = registry.expect("Address").unwrap();

    let shipping = Schema::new().field("ship_to", NestedField::new(address.clone()).required());
    let billing = Schema::new().field("bill_to", NestedField::new(address).required());

    let good = json!({"street": "Main St", "city": "Springfield"});
    assert!(shipping.load(&json!({"ship_to": good})).is_success());
    assert!(billing
        .load(&json!({"bill_to": {"street": "Main St"}}))
        .is_failure());
}

#[test]
fn test_nested_round_trip() {
    let schema = Schema::new()
        .field("name", StringField::new().required())
        .field("address", NestedField::new(address_schema()).required());

    let original = json!({
        "name": "Alice",
        "address": {"street": "Main St", "city": "Springfield"}
    });
    let dumped = schema.dump(&original).into_result().unwrap();
    let loaded = schema
        .load(&serde_json::Value::Object(dumped))
        .into_result()
        .unwrap();
    assert_eq!(serde_json::Value::Object(loaded), original);
}
