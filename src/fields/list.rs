//! List field.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;

use super::traits::{Field, FieldConfig};

const LIST_MESSAGES: &[(&str, &str)] = &[("invalid", "Not a valid list.")];

/// Converts homogeneous list attributes.
///
/// Every element is converted through the inner field; element errors are
/// reported at their index (`tags[2]`) and accumulated across the whole
/// list rather than stopping at the first bad element.
///
/// # Example
///
/// ```rust
/// use alembic::fields::{IntegerField, ListField};
/// use alembic::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().field("scores", ListField::new(IntegerField::new()));
///
/// let report = schema.validate(&json!({"scores": [1, "x", 3, "y"]}));
/// assert_eq!(report.get("scores[1]").unwrap().len(), 1);
/// assert_eq!(report.get("scores[3]").unwrap().len(), 1);
/// ```
pub struct ListField {
    config: FieldConfig,
    inner: Box<dyn Field>,
}

impl ListField {
    /// Creates a list field converting elements with `inner`.
    pub fn new<F: Field + 'static>(inner: F) -> Self {
        Self {
            config: FieldConfig::new(LIST_MESSAGES),
            inner: Box::new(inner),
        }
    }

    super::config_builders!();
}

impl Field for ListField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, attr: &str, obj: &Value) -> Result<Value, ConversionError> {
        let items = value.as_array().ok_or_else(|| {
            ConversionError::new(FieldPath::root(), self.config.messages.resolve("invalid"))
                .with_code("invalid")
        })?;

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let serialized = self
                .inner
                .serialize(item, attr, obj)
                .map_err(|e| e.prefixed(&FieldPath::root().push_index(i)))?;
            out.push(serialized);
        }
        Ok(Value::Array(out))
    }

    fn deserialize(
        &self,
        value: &Value,
        attr: &str,
        data: &Value,
        path: &FieldPath,
    ) -> Validation<Value, ConversionErrors> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return Validation::Failure(ConversionErrors::single(
                    ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                        .with_code("invalid"),
                ));
            }
        };

        let mut out = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let item_path = path.push_index(i);
            match self.inner.load(Some(item), attr, data, &item_path) {
                Validation::Success(Some(native)) => out.push(native),
                Validation::Success(None) => {}
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(Value::Array(out))
        } else {
            Validation::Failure(ConversionErrors::from_vec(errors))
        }
    }
}
