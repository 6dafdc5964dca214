//! Function-delegating field.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::path::FieldPath;

use super::traits::{Field, FieldConfig};

const FUNCTION_MESSAGES: &[(&str, &str)] = &[("invalid", "Invalid value.")];

type SerializeFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
type DeserializeFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// A field whose conversion is delegated to supplied functions.
///
/// The serialize function receives the whole object being dumped, so it
/// can derive a value from several attributes. The optional deserialize
/// function receives only the raw input value. Without a deserialize
/// function the field is dump-only and is skipped during load.
///
/// # Example
///
/// ```rust
/// use alembic::fields::FunctionField;
/// use alembic::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().field(
///     "balance",
///     FunctionField::new(|obj| Ok(json!(format!("{:.2}", obj["balance"].as_f64().unwrap_or(0.0)))))
///         .with_deserialize(|raw| {
///             raw.as_str()
///                 .and_then(|s| s.parse::<f64>().ok())
///                 .map(|f| json!(f))
///                 .ok_or_else(|| "Not a valid balance.".to_string())
///         }),
/// );
///
/// let loaded = schema.load(&json!({"balance": "100.00"})).into_result().unwrap();
/// assert_eq!(loaded["balance"], json!(100.0));
/// ```
pub struct FunctionField {
    config: FieldConfig,
    serialize_fn: SerializeFn,
    deserialize_fn: Option<DeserializeFn>,
}

impl FunctionField {
    /// Creates a dump-only field serializing with `serialize`.
    ///
    /// The function is invoked with the whole object being dumped. The
    /// field stays dump-only until [`with_deserialize`] configures the
    /// reverse direction.
    ///
    /// [`with_deserialize`]: FunctionField::with_deserialize
    pub fn new<F>(serialize: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            config: FieldConfig::new(FUNCTION_MESSAGES),
            serialize_fn: Arc::new(serialize),
            deserialize_fn: None,
        }
    }

    /// Configures the deserialize direction.
    ///
    /// The function is invoked with only the raw input value. Its error
    /// message is reported under the `invalid` code.
    pub fn with_deserialize<F>(mut self, deserialize: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.deserialize_fn = Some(Arc::new(deserialize));
        self
    }

    super::config_builders!();
}

impl Field for FunctionField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn is_dump_only(&self) -> bool {
        self.config.dump_only || self.deserialize_fn.is_none()
    }

    fn serialize(&self, _value: &Value, _attr: &str, obj: &Value) -> Result<Value, ConversionError> {
        (self.serialize_fn)(obj).map_err(|message| {
            ConversionError::new(FieldPath::root(), message).with_code("invalid")
        })
    }

    // The default pipeline short-circuits missing attributes to the dump
    // default, but a function field derives its value from the whole
    // object and must run even when no attribute with its name exists.
    fn dump(&self, obj: &Value, attr: &str) -> Result<Option<Value>, ConversionError> {
        let raw = obj.get(attr).cloned().unwrap_or(Value::Null);
        self.serialize(&raw, attr, obj).map(Some)
    }

    fn deserialize(
        &self,
        value: &Value,
        _attr: &str,
        _data: &Value,
        path: &FieldPath,
    ) -> Validation<Value, ConversionErrors> {
        match &self.deserialize_fn {
            Some(deserialize) => match deserialize(value) {
                Ok(native) => Validation::Success(native),
                Err(message) => Validation::Failure(ConversionErrors::single(
                    ConversionError::new(path.clone(), message).with_code("invalid"),
                )),
            },
            // Dump-only fields are skipped by the schema during load; a
            // direct call still gets a well-formed failure.
            None => Validation::Failure(ConversionErrors::single(
                ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
                    .with_code("invalid"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_sees_whole_object() {
        let field = FunctionField::new(|obj| {
            let first = obj["first"].as_str().unwrap_or_default();
            let last = obj["last"].as_str().unwrap_or_default();
            Ok(json!(format!("{} {}", first, last)))
        });
        let out = field
            .dump(&json!({"first": "Ada", "last": "Lovelace"}), "full_name")
            .unwrap();
        assert_eq!(out, Some(json!("Ada Lovelace")));
    }

    #[test]
    fn test_dump_only_without_deserialize() {
        let field = FunctionField::new(|_| Ok(json!(1)));
        assert!(field.is_dump_only());

        let with_reverse = FunctionField::new(|_| Ok(json!(1))).with_deserialize(|v| Ok(v.clone()));
        assert!(!with_reverse.is_dump_only());
    }

    #[test]
    fn test_deserialize_receives_only_raw_value() {
        let field = FunctionField::new(|_| Ok(json!(null))).with_deserialize(|raw| {
            raw.as_str()
                .and_then(|s| s.parse::<f64>().ok())
                .map(|f| json!(f))
                .ok_or_else(|| "Not a valid number.".to_string())
        });
        let result = field.deserialize(
            &json!("100.00"),
            "balance",
            &json!({"balance": "100.00", "noise": true}),
            &FieldPath::root().push_field("balance"),
        );
        assert_eq!(result.into_result().unwrap(), json!(100.0));
    }

    #[test]
    fn test_deserialize_error_message_is_reported() {
        let field =
            FunctionField::new(|_| Ok(json!(null))).with_deserialize(|_| Err("rejected".into()));
        let errors = field
            .deserialize(
                &json!(1),
                "x",
                &json!({}),
                &FieldPath::root().push_field("x"),
            )
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().message, "rejected");
        assert_eq!(errors.first().code, "invalid");
    }

    #[test]
    fn test_serialize_failure_becomes_error() {
        let field = FunctionField::new(|_| Err("cannot derive".to_string()));
        let err = field.dump(&json!({}), "x").unwrap_err();
        assert_eq!(err.message, "cannot derive");
    }
}
