//! Nested schema field.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;
use crate::schema::Schema;

use super::traits::{Field, FieldConfig};

const NESTED_MESSAGES: &[(&str, &str)] = &[("invalid", "Not a valid mapping.")];

/// Delegates conversion of an attribute to another [`Schema`].
///
/// The nested schema is captured explicitly at construction; schemas
/// registered in a [`SchemaRegistry`](crate::SchemaRegistry) can be looked
/// up once and plugged in here. Errors from the nested schema are reported
/// in the parent's coordinate space (`address.city`).
///
/// # Example
///
/// ```rust
/// use alembic::fields::{NestedField, StringField};
/// use alembic::Schema;
/// use serde_json::json;
///
/// let address = Schema::new().field("city", StringField::new().required());
/// let user = Schema::new().field("address", NestedField::new(address));
///
/// let report = user.validate(&json!({"address": {}}));
/// assert!(report.get("address.city").is_some());
/// ```
pub struct NestedField {
    config: FieldConfig,
    schema: Arc<Schema>,
}

impl NestedField {
    /// Creates a nested field delegating to `schema`.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            config: FieldConfig::new(NESTED_MESSAGES),
            schema: schema.into(),
        }
    }

    super::config_builders!();
}

impl Field for NestedField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
        match self.schema.dump(value) {
            Validation::Success(map) => Ok(Value::Object(map)),
            Validation::Failure(errors) => Err(errors.first().clone()),
        }
    }

    fn deserialize(
        &self,
        value: &Value,
        _attr: &str,
        _data: &Value,
        path: &FieldPath,
    ) -> Validation<Value, ConversionErrors> {
        if !value.is_object() {
            return Validation::Failure(ConversionErrors::single(
                ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                    .with_code("invalid"),
            ));
        }
        match self.schema.load(value) {
            Validation::Success(map) => Validation::Success(Value::Object(map)),
            Validation::Failure(errors) => Validation::Failure(errors.prefixed(path)),
        }
    }
}
