//! Concurrent use of shared schemas and registries.
//!
//! Schemas are immutable after construction; all per-call state is local
//! to the invocation, so one instance can serve many threads.

use std::sync::Arc;
use std::thread;

use alembic::fields::{IntegerField, StringField};
use alembic::{Schema, SchemaRegistry};
use serde_json::json;

#[test]
fn test_schema_shared_across_threads() {
    let schema = Arc::new(
        Schema::new()
            .field("name", StringField::new().required().min_len(1))
            .field("age", IntegerField::new().required().min(0)),
    );

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                for i in 0..100 {
                    let ok = schema.load(&json!({"name": format!("u{t}"), "age": i}));
                    assert!(ok.is_success());

                    let bad = schema.load(&json!({"name": "", "age": -1}));
                    let errors = bad.into_result().unwrap_err();
                    assert_eq!(errors.len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registry_concurrent_register_and_get() {
    let registry = SchemaRegistry::new();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = registry.clone();
            thread::spawn(move || {
                let name = format!("Schema{t}");
                registry
                    .register(&name, Schema::new().field("x", IntegerField::new()))
                    .unwrap();
                for _ in 0..100 {
                    assert!(registry.get(&name).is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.names().len(), 8);
}

#[test]
fn test_duplicate_registration_race_yields_one_winner() {
    let registry = SchemaRegistry::new();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .register("Contested", Schema::new())
                    .is_ok()
            })
        })
        .collect();

    let wins: usize = handles
        .into_iter()
        .map(|h| usize::from(h.join().unwrap()))
        .sum();
    assert_eq!(wins, 1);
}
