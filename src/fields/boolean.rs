//! Boolean field.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;

use super::traits::{Field, FieldConfig};

const BOOLEAN_MESSAGES: &[(&str, &str)] = &[("invalid", "Not a valid boolean.")];

const TRUTHY: &[&str] = &["t", "true", "on", "y", "yes", "1"];
const FALSY: &[&str] = &["f", "false", "off", "n", "no", "0"];

/// Converts boolean attributes.
///
/// Deserialization accepts booleans, the integers 0 and 1, and the usual
/// truthy/falsy strings (`"true"`, `"on"`, `"y"`, `"1"`, ... and their
/// negative counterparts), case-insensitively.
#[derive(Clone)]
pub struct BooleanField {
    config: FieldConfig,
}

impl BooleanField {
    /// Creates a boolean field.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::new(BOOLEAN_MESSAGES),
        }
    }

    super::config_builders!();

    fn coerce(&self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => {
                let lowered = s.to_lowercase();
                if TRUTHY.contains(&lowered.as_str()) {
                    Some(true)
                } else if FALSY.contains(&lowered.as_str()) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for BooleanField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for BooleanField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
        match value.as_bool() {
            Some(b) => Ok(Value::Bool(b)),
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
        match self.coerce(value) {
            Some(b) => Validation::Success(Value::Bool(b)),
            None => Validation::Failure(ConversionErrors::single(
                ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                    .with_code("invalid"),
            )),
        }
    }
}
