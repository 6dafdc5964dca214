use alembic::fields::{BooleanField, FloatField, IntegerField, StringField};
use alembic::{Schema, Unknown};
use serde_json::json;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

#[test]
fn test_load_converts_all_fields() {
    let schema = Schema::new()
        .field("name", StringField::new().required())
        .field("age", IntegerField::new().required())
        .field("score", FloatField::new())
        .field("active", BooleanField::new());

    let out = schema
        .load(&json!({
            "name": "Alice",
            "age": "30",
            "score": "99.5",
            "active": "yes"
        }))
        .into_result()
        .unwrap();

    assert_eq!(out["name"], json!("Alice"));
    assert_eq!(out["age"], json!(30));
    assert_eq!(out["score"], json!(99.5));
    assert_eq!(out["active"], json!(true));
}

#[test]
fn test_all_invalid_fields_reported_not_just_first() {
    let schema = Schema::new()
        .field("name", StringField::new().required().min_len(3))
        .field("age", IntegerField::new().required())
        .field("active", BooleanField::new().required());

    let errors = unwrap_failure(schema.load(&json!({
        "name": "ab",
        "age": "not a number",
        "active": "maybe"
    })));

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.with_code("min_len").len(), 1);
    assert_eq!(errors.with_code("invalid").len(), 2);
}

#[test]
fn test_report_has_entry_per_invalid_field() {
    let schema = Schema::new()
        .field("name", StringField::new().required())
        .field("age", IntegerField::new().required());

    let report = schema.validate(&json!({}));
    assert_eq!(report.len(), 2);
    assert_eq!(
        report.get("name"),
        Some(&["Missing data for required field.".to_string()][..])
    );
    assert_eq!(
        report.get("age"),
        Some(&["Missing data for required field.".to_string()][..])
    );
}

#[test]
fn test_multiple_messages_per_field_in_report() {
    let schema = Schema::new().field(
        "username",
        StringField::new()
            .required()
            .min_len(5)
            .matches(r"^[a-z]+$")
            .unwrap(),
    );
    let report = schema.validate(&json!({"username": "AB1"}));
    assert_eq!(report.get("username").unwrap().len(), 2);
}

#[test]
fn test_non_object_input_reported_under_schema_key() {
    let schema = Schema::new().field("name", StringField::new());
    let report = schema.validate(&json!([1, 2, 3]));
    assert_eq!(
        report.get("_schema"),
        Some(&["Invalid input type.".to_string()][..])
    );
}

#[test]
fn test_optional_missing_field_omitted() {
    let schema = Schema::new()
        .field("name", StringField::new().required())
        .field("nickname", StringField::new());
    let out = schema.load(&json!({"name": "Alice"})).into_result().unwrap();
    assert!(out.get("nickname").is_none());
}

#[test]
fn test_load_default_substituted() {
    let schema = Schema::new().field("role", StringField::new().load_default(json!("user")));
    let out = schema.load(&json!({})).into_result().unwrap();
    assert_eq!(out["role"], json!("user"));
}

#[test]
fn test_allow_none() {
    let schema = Schema::new().field("note", StringField::new().allow_none());
    let out = schema.load(&json!({"note": null})).into_result().unwrap();
    assert_eq!(out["note"], json!(null));

    let strict = Schema::new().field("note", StringField::new());
    let errors = unwrap_failure(strict.load(&json!({"note": null})));
    assert_eq!(errors.first().message, "Field may not be null.");
}

#[test]
fn test_unknown_policies() {
    let data = json!({"known": "x", "surprise": 1});

    let raising = Schema::new().field("known", StringField::new());
    let errors = unwrap_failure(raising.load(&data));
    assert_eq!(errors.first().code, "unknown");

    let excluding = Schema::new()
        .field("known", StringField::new())
        .unknown(Unknown::Exclude);
    let out = excluding.load(&data).into_result().unwrap();
    assert!(out.get("surprise").is_none());

    let including = Schema::new()
        .field("known", StringField::new())
        .unknown(Unknown::Include);
    let out = including.load(&data).into_result().unwrap();
    assert_eq!(out["surprise"], json!(1));
}

#[test]
fn test_dump_only_and_load_only() {
    let schema = Schema::new()
        .field("id", IntegerField::new().dump_only())
        .field("password", StringField::new().load_only())
        .unknown(Unknown::Exclude);

    let loaded = schema
        .load(&json!({"password": "hunter2"}))
        .into_result()
        .unwrap();
    assert!(loaded.get("id").is_none());
    assert_eq!(loaded["password"], json!("hunter2"));

    let dumped = schema
        .dump(&json!({"id": 7, "password": "hunter2"}))
        .into_result()
        .unwrap();
    assert_eq!(dumped["id"], json!(7));
    assert!(dumped.get("password").is_none());
}

#[test]
fn test_schema_reusable_across_calls() {
    let schema = Schema::new().field("n", IntegerField::new().required());
    for i in 0..10 {
        let out = schema.load(&json!({"n": i})).into_result().unwrap();
        assert_eq!(out["n"], json!(i));
    }
    assert!(!schema.validate(&json!({})).is_empty());
    // Earlier failures leave no residue.
    assert!(schema.validate(&json!({"n": 1})).is_empty());
}

#[test]
fn test_dump_serializes_fields() {
    let schema = Schema::new()
        .field("name", StringField::new())
        .field("age", IntegerField::new());
    let out = schema
        .dump(&json!({"name": "Bob", "age": "41"}))
        .into_result()
        .unwrap();
    assert_eq!(out["name"], json!("Bob"));
    assert_eq!(out["age"], json!(41));
}

#[test]
fn test_dump_accumulates_errors_across_fields() {
    let schema = Schema::new()
        .field("a", IntegerField::new())
        .field("b", IntegerField::new());
    let errors = unwrap_failure(schema.dump(&json!({"a": "x", "b": "y"})));
    assert_eq!(errors.len(), 2);
    let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "b"]);
}

#[test]
fn test_field_names_in_declaration_order() {
    let schema = Schema::new()
        .field("z", StringField::new())
        .field("a", StringField::new());
    let names: Vec<_> = schema.field_names().collect();
    assert_eq!(names, vec!["z", "a"]);
}
