//! Numeric fields.
//!
//! [`IntegerField`] converts whole numbers, accepting integral JSON numbers
//! and digit strings while rejecting fractional values. [`FloatField`]
//! converts any finite number, including numeric strings like `"100.00"`.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;

use super::traits::{Field, FieldConfig};

const INTEGER_MESSAGES: &[(&str, &str)] = &[
    ("invalid", "Not a valid integer."),
    ("min", "Must be greater than or equal to {min}."),
    ("max", "Must be less than or equal to {max}."),
];

const FLOAT_MESSAGES: &[(&str, &str)] = &[("invalid", "Not a valid number.")];

/// A bound applied to integer values during load.
#[derive(Clone)]
enum IntegerConstraint {
    Min(i64),
    Max(i64),
}

/// Converts integer attributes.
///
/// # Example
///
/// ```rust
/// use alembic::fields::IntegerField;
/// use alembic::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().field("age", IntegerField::new().min(0).max(150));
///
/// assert!(schema.validate(&json!({"age": 30})).is_empty());
/// assert!(!schema.validate(&json!({"age": 30.5})).is_empty());
/// ```
#[derive(Clone)]
pub struct IntegerField {
    config: FieldConfig,
    constraints: Vec<IntegerConstraint>,
}

impl IntegerField {
    /// Creates an unconstrained integer field.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::new(INTEGER_MESSAGES),
            constraints: Vec::new(),
        }
    }

    /// Requires the value to be at least `min` (inclusive).
    pub fn min(mut self, min: i64) -> Self {
        self.constraints.push(IntegerConstraint::Min(min));
        self
    }

    /// Requires the value to be at most `max` (inclusive).
    pub fn max(mut self, max: i64) -> Self {
        self.constraints.push(IntegerConstraint::Max(max));
        self
    }

    super::config_builders!();

    fn coerce(&self, value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i)
                } else {
                    // Integral floats (42.0) are accepted, fractional ones
                    // are not.
                    n.as_f64().and_then(|f| {
                        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                            Some(f as i64)
                        } else {
                            None
                        }
                    })
                }
            }
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }

    fn check(&self, i: i64, path: &FieldPath) -> Vec<ConversionError> {
        let mut errors = Vec::new();
        for constraint in &self.constraints {
            match constraint {
                IntegerConstraint::Min(min) => {
                    if i < *min {
                        let message = self
                            .config
                            .messages
                            .render("min", &[("min", min.to_string())]);
                        errors.push(ConversionError::new(path.clone(), message).with_code("min"));
                    }
                }
                IntegerConstraint::Max(max) => {
                    if i > *max {
                        let message = self
                            .config
                            .messages
                            .render("max", &[("max", max.to_string())]);
                        errors.push(ConversionError::new(path.clone(), message).with_code("max"));
                    }
                }
            }
        }
        errors
    }
}

impl Default for IntegerField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for IntegerField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
        match self.coerce(value) {
            Some(i) => Ok(Value::Number(Number::from(i))),
            None => Err(ConversionError::new(
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
        let i = match self.coerce(value) {
            Some(i) => i,
            None => {
                return Validation::Failure(ConversionErrors::single(
                    ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                        .with_code("invalid"),
                ));
            }
        };

        let errors = self.check(i, path);
        if errors.is_empty() {
            Validation::Success(Value::Number(Number::from(i)))
        } else {
            Validation::Failure(ConversionErrors::from_vec(errors))
        }
    }
}

/// Converts floating-point attributes.
///
/// Accepts any finite JSON number and numeric strings (`"100.00"` loads as
/// `100.0`).
#[derive(Clone)]
pub struct FloatField {
    config: FieldConfig,
}

impl FloatField {
    /// Creates a float field.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::new(FLOAT_MESSAGES),
        }
    }

    super::config_builders!();

    fn coerce(&self, value: &Value) -> Option<f64> {
        let f = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }?;
        f.is_finite().then_some(f)
    }
}

impl Default for FloatField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for FloatField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
        match self.coerce(value).and_then(Number::from_f64) {
            Some(n) => Ok(Value::Number(n)),
            None => Err(ConversionError::new(
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
        match self.coerce(value).and_then(Number::from_f64) {
            Some(n) => Validation::Success(Value::Number(n)),
            None => Validation::Failure(ConversionErrors::single(
                ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                    .with_code("invalid"),
            )),
        }
    }
}
