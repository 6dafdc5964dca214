//! String field.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;

use super::traits::{Field, FieldConfig};

const STRING_MESSAGES: &[(&str, &str)] = &[
    ("invalid", "Not a valid string."),
    ("min_len", "Shorter than minimum length {min}."),
    ("max_len", "Longer than maximum length {max}."),
    ("pattern", "String does not match expected pattern."),
];

/// A constraint applied to string values during load.
#[derive(Clone)]
enum StringConstraint {
    MinLen(usize),
    MaxLen(usize),
    Pattern(Regex),
}

/// Converts string attributes.
///
/// Deserializes only strings; length and pattern constraints are checked
/// after the type check and all violations are reported together.
/// Serialization stringifies scalars, so numeric attributes can feed a
/// string representation.
///
/// # Example
///
/// ```rust
/// use alembic::fields::StringField;
/// use alembic::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().field(
///     "username",
///     StringField::new().required().min_len(3).max_len(20),
/// );
///
/// let report = schema.validate(&json!({"username": "ab"}));
/// assert_eq!(report.get("username").unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct StringField {
    config: FieldConfig,
    constraints: Vec<StringConstraint>,
}

impl StringField {
    /// Creates an unconstrained string field.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::new(STRING_MESSAGES),
            constraints: Vec::new(),
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLen(min));
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLen(max));
        self
    }

    /// Requires the string to match `pattern`.
    ///
    /// Fails at construction time if the pattern is not a valid regex.
    pub fn matches(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.constraints
            .push(StringConstraint::Pattern(Regex::new(pattern)?));
        Ok(self)
    }

    super::config_builders!();

    fn check(&self, s: &str, path: &FieldPath) -> Vec<ConversionError> {
        let mut errors = Vec::new();
        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLen(min) => {
                    if s.chars().count() < *min {
                        let message = self
                            .config
                            .messages
                            .render("min_len", &[("min", min.to_string())]);
                        errors.push(
                            ConversionError::new(path.clone(), message).with_code("min_len"),
                        );
                    }
                }
                StringConstraint::MaxLen(max) => {
                    if s.chars().count() > *max {
                        let message = self
                            .config
                            .messages
                            .render("max_len", &[("max", max.to_string())]);
                        errors.push(
                            ConversionError::new(path.clone(), message).with_code("max_len"),
                        );
                    }
                }
                StringConstraint::Pattern(regex) => {
                    if !regex.is_match(s) {
                        errors.push(
                            ConversionError::new(
                                path.clone(),
                                self.config.messages.resolve("pattern"),
                            )
                            .with_code("pattern"),
                        );
                    }
                }
            }
        }
        errors
    }
}

impl Default for StringField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for StringField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
        match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(ConversionError::new(
                FieldPath::root(),
                self.config.messages.resolve("invalid"),
            )
            .with_code("invalid")),
        }
    }

    fn deserialize(
        &self,
        value: &Value,
        _attr: &str,
        _data: &Value,
        path: &FieldPath,
    ) -> Validation<Value, ConversionErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(ConversionErrors::single(
                    ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                        .with_code("invalid"),
                ));
            }
        };

        let errors = self.check(s, path);
        if errors.is_empty() {
            Validation::Success(Value::String(s.to_string()))
        } else {
            Validation::Failure(ConversionErrors::from_vec(errors))
        }
    }
}
