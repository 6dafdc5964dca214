//! Structured error reports keyed by field.
//!
//! [`ErrorReport`] is the user-facing shape of accumulated errors: an
//! ordered mapping from field path to the list of messages recorded there.
//! Errors with no field path (schema-level validators, wrong input type)
//! are grouped under the `_schema` key.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::ConversionErrors;

/// Key under which schema-level errors are reported.
pub const SCHEMA_KEY: &str = "_schema";

/// An ordered mapping from field path to error messages.
///
/// One `load` call produces at most one report, with an entry for every
/// field that failed, in field declaration order.
///
/// # Example
///
/// ```rust
/// use alembic::{fields::IntegerField, fields::StringField, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("name", StringField::new().min_len(1))
///     .field("age", IntegerField::new());
///
/// let report = schema.validate(&json!({"name": "", "age": "x"}));
/// assert_eq!(report.len(), 2);
/// assert!(report.get("age").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorReport {
    entries: IndexMap<String, Vec<String>>,
}

impl ErrorReport {
    /// An empty report, meaning validation passed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a report from accumulated errors.
    ///
    /// Each error is keyed by its full path string; root-path errors go
    /// under [`SCHEMA_KEY`]. Insertion order follows error order, which
    /// follows field declaration order.
    pub fn from_errors(errors: &ConversionErrors) -> Self {
        let mut entries: IndexMap<String, Vec<String>> = IndexMap::new();
        for error in errors.iter() {
            let key = if error.path.is_root() {
                SCHEMA_KEY.to_string()
            } else {
                error.path.to_string()
            };
            entries.entry(key).or_default().push(error.message.clone());
        }
        Self { entries }
    }

    /// True when no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded for the given field path, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// Iterates over `(field path, messages)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Renders the report as a JSON object of message arrays.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, messages) in &self.entries {
            map.insert(key.clone(), json!(messages));
        }
        Value::Object(map)
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no errors");
        }
        for (key, messages) in &self.entries {
            writeln!(f, "{}: {}", key, messages.join("; "))?;
        }
        Ok(())
    }
}
