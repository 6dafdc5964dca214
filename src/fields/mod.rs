//! Field types for converting individual attributes.
//!
//! Each field type converts between a native value and its primitive
//! representation and accumulates all conversion errors rather than
//! short-circuiting on the first failure. Fields are declared with
//! consuming builder methods and handed to a [`Schema`](crate::Schema):
//!
//! ```rust
//! use alembic::fields::{IntegerField, StringField};
//! use alembic::Schema;
//!
//! let schema = Schema::new()
//!     .field("name", StringField::new().required().min_len(1))
//!     .field("age", IntegerField::new().min(0));
//! ```

mod boolean;
mod function;
mod list;
mod nested;
mod numeric;
mod string;
mod traits;

pub use boolean::BooleanField;
pub use function::FunctionField;
pub use list::ListField;
pub use nested::NestedField;
pub use numeric::{FloatField, IntegerField};
pub use string::StringField;
pub use traits::{Field, FieldConfig, Validator};

/// Generates the builder methods shared by every concrete field type.
///
/// Expects the implementing struct to have a `config: FieldConfig` member.
macro_rules! config_builders {
    () => {
        /// Fails load with the `required` code when the field is missing
        /// from input data.
        pub fn required(mut self) -> Self {
            self.config.required = true;
            self
        }

        /// Accepts explicit nulls during load.
        pub fn allow_none(mut self) -> Self {
            self.config.allow_none = true;
            self
        }

        /// Substitutes `value` when the field is missing from input data.
        pub fn load_default(mut self, value: serde_json::Value) -> Self {
            self.config.load_default = Some(value);
            self
        }

        /// Substitutes `value` when the attribute is missing or null
        /// during dump.
        pub fn dump_default(mut self, value: serde_json::Value) -> Self {
            self.config.dump_default = Some(value);
            self
        }

        /// Skips this field during load.
        pub fn dump_only(mut self) -> Self {
            self.config.dump_only = true;
            self
        }

        /// Skips this field during dump.
        pub fn load_only(mut self) -> Self {
            self.config.load_only = true;
            self
        }

        /// Overrides the message for an error code on this instance.
        ///
        /// Instance overrides win over the field type's defaults and the
        /// base catalog.
        pub fn message(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
            let catalog = std::mem::take(&mut self.config.messages);
            self.config.messages = catalog.with_override(code, text);
            self
        }

        /// Attaches a validator run against the deserialized value.
        ///
        /// The returned error message is reported under the
        /// `validator_failed` code.
        pub fn validator<F>(mut self, validate: F) -> Self
        where
            F: Fn(&serde_json::Value) -> Result<(), String> + Send + Sync + 'static,
        {
            self.config.validators.push(std::sync::Arc::new(validate));
            self
        }
    };
}

pub(crate) use config_builders;
