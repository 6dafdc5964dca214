//! Schema orchestration.
//!
//! A [`Schema`] is an ordered mapping of field name to field. `load` and
//! `dump` iterate the fields in declaration order, invoke each field's
//! conversion pipeline, and collect every error into one failure instead
//! of stopping at the first. Schemas are immutable after construction and
//! safe to share across threads; all per-call state is local.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors, ErrorReport};
use crate::fields::Field;
use crate::path::FieldPath;

/// How fields present in the input but absent from the schema are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unknown {
    /// Report an error per unknown field.
    #[default]
    Raise,
    /// Silently drop unknown fields.
    Exclude,
    /// Copy unknown fields through untouched.
    Include,
}

/// A processing hook run before or after conversion.
///
/// Hooks take the whole value and return the processed value, or an error
/// that fails the call.
pub type Hook = Arc<dyn Fn(Value) -> Result<Value, ConversionError> + Send + Sync>;

/// A cross-field validator run against the loaded output.
///
/// Skipped entirely when any field-level error was recorded, so validators
/// can assume every field converted cleanly.
pub type SchemaValidator =
    Arc<dyn Fn(&Map<String, Value>) -> Result<(), ConversionError> + Send + Sync>;

/// An ordered set of named fields defining a load/dump contract.
///
/// # Example
///
/// ```rust
/// use alembic::fields::{IntegerField, StringField};
/// use alembic::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("name", StringField::new().required().min_len(1))
///     .field("age", IntegerField::new().required().min(0));
///
/// // One load call reports every failure.
/// let report = schema.validate(&json!({"name": "", "age": "x"}));
/// assert_eq!(report.len(), 2);
/// ```
#[derive(Default)]
pub struct Schema {
    fields: IndexMap<String, Box<dyn Field>>,
    unknown: Unknown,
    pre_load: Vec<Hook>,
    post_load: Vec<Hook>,
    pre_dump: Vec<Hook>,
    post_dump: Vec<Hook>,
    validators: Vec<SchemaValidator>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("unknown", &self.unknown)
            .finish_non_exhaustive()
    }
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field under `name`.
    ///
    /// Names are unique within a schema; declaring a name twice replaces
    /// the earlier field while keeping its declaration position.
    pub fn field<F: Field + 'static>(mut self, name: impl Into<String>, field: F) -> Self {
        self.fields.insert(name.into(), Box::new(field));
        self
    }

    /// Sets the unknown-field policy. The default is [`Unknown::Raise`].
    pub fn unknown(mut self, policy: Unknown) -> Self {
        self.unknown = policy;
        self
    }

    /// Registers a hook run on the raw input before field conversion.
    pub fn pre_load<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.pre_load.push(Arc::new(hook));
        self
    }

    /// Registers a hook run on the loaded output after field conversion
    /// and schema validators.
    pub fn post_load<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.post_load.push(Arc::new(hook));
        self
    }

    /// Registers a hook run on the object before dumping.
    pub fn pre_dump<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.pre_dump.push(Arc::new(hook));
        self
    }

    /// Registers a hook run on the dumped output.
    pub fn post_dump<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.post_dump.push(Arc::new(hook));
        self
    }

    /// Registers a cross-field validator.
    ///
    /// Validators run only when every field converted without error, in
    /// registration order; each failing validator contributes one error.
    pub fn validates<F>(mut self, validate: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<(), ConversionError> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validate));
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Deserializes input data into a validated mapping.
    ///
    /// Runs pre-load hooks, then every field's load pipeline in
    /// declaration order, the unknown-field policy, cross-field
    /// validators, and finally post-load hooks. All errors from the field
    /// pass are accumulated into a single failure.
    pub fn load(&self, data: &Value) -> Validation<Map<String, Value>, ConversionErrors> {
        let mut data = data.clone();
        for hook in &self.pre_load {
            data = match hook(data) {
                Ok(processed) => processed,
                Err(e) => return Validation::Failure(ConversionErrors::single(e)),
            };
        }

        let obj = match data.as_object() {
            Some(obj) => obj,
            None => {
                return Validation::Failure(ConversionErrors::single(
                    ConversionError::new(FieldPath::root(), "Invalid input type.")
                        .with_code("invalid_type"),
                ));
            }
        };

        let root = FieldPath::root();
        let mut errors: Vec<ConversionError> = Vec::new();
        let mut out = Map::new();

        for (name, field) in &self.fields {
            if field.is_dump_only() {
                continue;
            }
            let path = root.push_field(name);
            match field.load(obj.get(name.as_str()), name, &data, &path) {
                Validation::Success(Some(native)) => {
                    out.insert(name.clone(), native);
                }
                Validation::Success(None) => {}
                Validation::Failure(e) => errors.extend(e),
            }
        }

        for (key, value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            match self.unknown {
                Unknown::Raise => errors.push(
                    ConversionError::new(root.push_field(key), "Unknown field.")
                        .with_code("unknown"),
                ),
                Unknown::Exclude => {}
                Unknown::Include => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }

        if errors.is_empty() {
            for validate in &self.validators {
                if let Err(e) = validate(&out) {
                    errors.push(e);
                }
            }
        }

        if !errors.is_empty() {
            return Validation::Failure(ConversionErrors::from_vec(errors));
        }

        let mut result = Value::Object(out);
        for hook in &self.post_load {
            result = match hook(result) {
                Ok(processed) => processed,
                Err(e) => return Validation::Failure(ConversionErrors::single(e)),
            };
        }
        match result {
            Value::Object(map) => Validation::Success(map),
            _ => Validation::Failure(ConversionErrors::single(
                ConversionError::new(FieldPath::root(), "Invalid input type.")
                    .with_code("invalid_type"),
            )),
        }
    }

    /// Serializes an object into its primitive mapping.
    ///
    /// Load-only fields are skipped; every other field's dump pipeline
    /// runs in declaration order, with errors accumulated across fields.
    pub fn dump(&self, obj: &Value) -> Validation<Map<String, Value>, ConversionErrors> {
        let mut value = obj.clone();
        for hook in &self.pre_dump {
            value = match hook(value) {
                Ok(processed) => processed,
                Err(e) => return Validation::Failure(ConversionErrors::single(e)),
            };
        }

        let root = FieldPath::root();
        let mut errors: Vec<ConversionError> = Vec::new();
        let mut out = Map::new();

        for (name, field) in &self.fields {
            if field.config().load_only {
                continue;
            }
            let path = root.push_field(name);
            match field.dump(&value, name) {
                Ok(Some(primitive)) => {
                    out.insert(name.clone(), primitive);
                }
                Ok(None) => {}
                Err(e) => errors.push(e.prefixed(&path)),
            }
        }

        if !errors.is_empty() {
            return Validation::Failure(ConversionErrors::from_vec(errors));
        }

        let mut result = Value::Object(out);
        for hook in &self.post_dump {
            result = match hook(result) {
                Ok(processed) => processed,
                Err(e) => return Validation::Failure(ConversionErrors::single(e)),
            };
        }
        match result {
            Value::Object(map) => Validation::Success(map),
            _ => Validation::Failure(ConversionErrors::single(
                ConversionError::new(FieldPath::root(), "Invalid input type.")
                    .with_code("invalid_type"),
            )),
        }
    }

    /// Loads a collection of items in parallel.
    ///
    /// Item errors are rebased under their index (`[2].name`) and
    /// accumulated across the whole collection in item order.
    pub fn load_many(&self, items: &[Value]) -> Validation<Vec<Map<String, Value>>, ConversionErrors> {
        let results: Vec<_> = items.par_iter().map(|item| self.load(item)).collect();
        collect_many(results)
    }

    /// Dumps a collection of objects in parallel.
    pub fn dump_many(&self, items: &[Value]) -> Validation<Vec<Map<String, Value>>, ConversionErrors> {
        let results: Vec<_> = items.par_iter().map(|item| self.dump(item)).collect();
        collect_many(results)
    }

    /// Loads `data` and returns only the error report.
    ///
    /// An empty report means validation passed.
    pub fn validate(&self, data: &Value) -> ErrorReport {
        match self.load(data) {
            Validation::Success(_) => ErrorReport::new(),
            Validation::Failure(errors) => ErrorReport::from_errors(&errors),
        }
    }
}

/// Merges per-item results, rebasing each item's errors under its index.
fn collect_many(
    results: Vec<Validation<Map<String, Value>, ConversionErrors>>,
) -> Validation<Vec<Map<String, Value>>, ConversionErrors> {
    let mut out = Vec::with_capacity(results.len());
    let mut errors: Vec<ConversionError> = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Validation::Success(map) => out.push(map),
            Validation::Failure(e) => {
                errors.extend(e.prefixed(&FieldPath::root().push_index(i)));
            }
        }
    }
    if errors.is_empty() {
        Validation::Success(out)
    } else {
        Validation::Failure(ConversionErrors::from_vec(errors))
    }
}

// Schemas are shared across threads; a Box<dyn Field> is Send + Sync by
// the trait's bounds, hooks and validators by their aliases' bounds.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
