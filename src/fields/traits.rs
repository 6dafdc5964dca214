//! The field contract.
//!
//! A [`Field`] converts one attribute between its native form and a
//! primitive representation. `serialize` goes native → primitive,
//! `deserialize` goes primitive → native and fails with conversion errors
//! when the input cannot be coerced. The provided [`load`](Field::load) and
//! [`dump`](Field::dump) pipelines layer the shared policy (required,
//! null handling, defaults, validators) on top of the per-type conversion,
//! so concrete fields only implement the conversion itself.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConversionError, ConversionErrors};
use crate::messages::MessageCatalog;
use crate::path::FieldPath;

/// A value-level validator run after deserialization.
///
/// Returns `Err` with a message to reject the value; the message is
/// reported verbatim under the `validator_failed` code.
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Configuration shared by every field type.
///
/// Built up through the builder methods each concrete field exposes
/// (`required()`, `allow_none()`, `load_default(...)`, ...). Immutable once
/// the field is handed to a schema.
#[derive(Clone)]
pub struct FieldConfig {
    /// Fail with `required` when the field is missing from input data.
    pub required: bool,
    /// Accept explicit nulls during load.
    pub allow_none: bool,
    /// Value substituted when the field is missing from input data.
    pub load_default: Option<Value>,
    /// Value substituted when the attribute is missing or null during dump.
    pub dump_default: Option<Value>,
    /// Skip this field during load.
    pub dump_only: bool,
    /// Skip this field during dump.
    pub load_only: bool,
    /// Resolved message catalog for this field instance.
    pub messages: MessageCatalog,
    /// Validators run against the deserialized value.
    pub validators: Vec<Validator>,
}

impl FieldConfig {
    /// Creates a config whose catalog is the base layer plus the field
    /// type's own default messages.
    pub fn new(type_messages: &[(&str, &str)]) -> Self {
        Self {
            required: false,
            allow_none: false,
            load_default: None,
            dump_default: None,
            dump_only: false,
            load_only: false,
            messages: MessageCatalog::base().with_layer(type_messages),
            validators: Vec::new(),
        }
    }
}

/// Conversion unit between native and primitive representations for one
/// schema attribute.
///
/// Implementors provide [`serialize`](Field::serialize) and
/// [`deserialize`](Field::deserialize) plus access to their
/// [`FieldConfig`]; the load/dump pipelines come for free. Custom fields
/// are ordinary implementations of this trait:
///
/// ```rust
/// use alembic::fields::{Field, FieldConfig};
/// use alembic::{ConversionError, ConversionErrors, ConversionResult, FieldPath};
/// use serde_json::{json, Value};
/// use stillwater::Validation;
///
/// struct UppercaseField {
///     config: FieldConfig,
/// }
///
/// impl Field for UppercaseField {
///     fn config(&self) -> &FieldConfig {
///         &self.config
///     }
///
///     fn serialize(&self, value: &Value, _attr: &str, _obj: &Value) -> Result<Value, ConversionError> {
///         Ok(json!(value.as_str().unwrap_or_default().to_lowercase()))
///     }
///
///     fn deserialize(
///         &self,
///         value: &Value,
///         _attr: &str,
///         _data: &Value,
///         path: &FieldPath,
///     ) -> ConversionResult<Value> {
///         match value.as_str() {
///             Some(s) => Validation::Success(json!(s.to_uppercase())),
///             None => Validation::Failure(ConversionErrors::single(
///                 ConversionError::new(path.clone(), self.config.messages.resolve("invalid"))
///                     .with_code("invalid"),
///             )),
///         }
///     }
/// }
/// ```
pub trait Field: Send + Sync {
    /// This field's configuration.
    fn config(&self) -> &FieldConfig;

    /// Converts a native attribute value to its primitive representation.
    ///
    /// `attr` is the name the field is bound to and `obj` the whole object
    /// being dumped; most fields only look at `value`, but delegating
    /// fields (see `FunctionField`) need the full object.
    fn serialize(&self, value: &Value, attr: &str, obj: &Value) -> Result<Value, ConversionError>;

    /// Converts input data to a native value, or fails with conversion
    /// errors located at `path`.
    ///
    /// `attr` and `data` mirror the serialize side: the bound name and the
    /// whole input mapping.
    fn deserialize(
        &self,
        value: &Value,
        attr: &str,
        data: &Value,
        path: &FieldPath,
    ) -> Validation<Value, ConversionErrors>;

    /// True when the field only participates in dump.
    ///
    /// Schemas skip dump-only fields during load.
    fn is_dump_only(&self) -> bool {
        self.config().dump_only
    }

    /// The load pipeline: missing/null policy, then conversion, then
    /// validators.
    ///
    /// `raw` is the value found under `attr` in the input, or `None` when
    /// absent. Returns `Success(None)` when the field should be omitted
    /// from the loaded output (optional and missing).
    fn load(
        &self,
        raw: Option<&Value>,
        attr: &str,
        data: &Value,
        path: &FieldPath,
    ) -> Validation<Option<Value>, ConversionErrors> {
        let cfg = self.config();
        match raw {
            None => {
                if let Some(default) = &cfg.load_default {
                    Validation::Success(Some(default.clone()))
                } else if cfg.required {
                    Validation::Failure(ConversionErrors::single(
                        ConversionError::new(path.clone(), cfg.messages.resolve("required"))
                            .with_code("required"),
                    ))
                } else {
                    Validation::Success(None)
                }
            }
            Some(Value::Null) => {
                if cfg.allow_none {
                    Validation::Success(Some(Value::Null))
                } else {
                    Validation::Failure(ConversionErrors::single(
                        ConversionError::new(path.clone(), cfg.messages.resolve("null"))
                            .with_code("null"),
                    ))
                }
            }
            Some(value) => match self.deserialize(value, attr, data, path) {
                Validation::Success(native) => {
                    let errors: Vec<ConversionError> = cfg
                        .validators
                        .iter()
                        .filter_map(|validate| validate(&native).err())
                        .map(|message| {
                            ConversionError::new(path.clone(), message)
                                .with_code("validator_failed")
                        })
                        .collect();
                    if errors.is_empty() {
                        Validation::Success(Some(native))
                    } else {
                        Validation::Failure(ConversionErrors::from_vec(errors))
                    }
                }
                Validation::Failure(errors) => Validation::Failure(errors),
            },
        }
    }

    /// The dump pipeline: missing/null attributes fall back to the dump
    /// default (or null), present values go through `serialize`.
    ///
    /// Returns `Ok(None)` when the field should be omitted from the dumped
    /// output.
    fn dump(&self, obj: &Value, attr: &str) -> Result<Option<Value>, ConversionError> {
        let cfg = self.config();
        match obj.get(attr) {
            None | Some(Value::Null) => {
                Ok(Some(cfg.dump_default.clone().unwrap_or(Value::Null)))
            }
            Some(value) => self.serialize(value, attr, obj).map(Some),
        }
    }
}
