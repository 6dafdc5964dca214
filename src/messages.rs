//! Error-message catalogs with layered resolution.
//!
//! Every field carries a [`MessageCatalog`] mapping error code to message
//! template. Resolution is layered: base defaults shared by all fields,
//! then the field type's own defaults, then per-instance overrides, with
//! later layers winning. Layers are merged once at field construction, so
//! lookups at conversion time are a single map read.

use indexmap::IndexMap;

/// Messages every field understands, regardless of type.
const BASE_MESSAGES: &[(&str, &str)] = &[
    ("required", "Missing data for required field."),
    ("null", "Field may not be null."),
    ("validator_failed", "Invalid value."),
];

/// A resolved mapping from error code to message template.
///
/// Templates may contain `{name}` placeholders filled in by
/// [`render`](MessageCatalog::render).
///
/// # Example
///
/// ```rust
/// use alembic::MessageCatalog;
///
/// let catalog = MessageCatalog::base()
///     .with_layer(&[("invalid", "Not a valid integer.")])
///     .with_override("required", "Age is required.");
///
/// assert_eq!(catalog.resolve("invalid"), "Not a valid integer.");
/// assert_eq!(catalog.resolve("required"), "Age is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: IndexMap<String, String>,
}

impl MessageCatalog {
    /// The base catalog: `required`, `null`, and `validator_failed`.
    pub fn base() -> Self {
        let mut messages = IndexMap::new();
        for (code, message) in BASE_MESSAGES {
            messages.insert((*code).to_string(), (*message).to_string());
        }
        Self { messages }
    }

    /// Merges in a field type's default messages; existing codes are
    /// replaced.
    pub fn with_layer(mut self, layer: &[(&str, &str)]) -> Self {
        for (code, message) in layer {
            self.messages
                .insert((*code).to_string(), (*message).to_string());
        }
        self
    }

    /// Sets an instance-level override for a single code.
    ///
    /// Overrides win over both the type layer and the base layer.
    pub fn with_override(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }

    /// Looks up the message template for a code.
    ///
    /// Unknown codes fall back to the `validator_failed` message so a
    /// missing catalog entry never turns into a panic at conversion time.
    pub fn resolve(&self, code: &str) -> String {
        self.messages
            .get(code)
            .cloned()
            .unwrap_or_else(|| "Invalid value.".to_string())
    }

    /// Resolves a code and substitutes `{name}` placeholders.
    ///
    /// Placeholders with no matching argument are left as-is.
    pub fn render(&self, code: &str, args: &[(&str, String)]) -> String {
        let mut message = self.resolve(code);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::base()
    }
}
