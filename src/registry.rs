//! Named schema storage for reuse.
//!
//! [`SchemaRegistry`] stores schemas under string names so shared shapes
//! can be defined once and wired into many
//! [`NestedField`](crate::fields::NestedField)s. Lookups happen when
//! schemas are being composed, not during validation; a nested field
//! always holds an explicit `Arc<Schema>`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::schema::Schema;

/// A thread-safe registry of named schemas.
///
/// # Example
///
/// ```rust
/// use alembic::fields::{NestedField, StringField};
/// use alembic::{Schema, SchemaRegistry};
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("Address", Schema::new().field("city", StringField::new().required()))
///     .unwrap();
///
/// let user = Schema::new().field(
///     "address",
///     NestedField::new(registry.expect("Address").unwrap()),
/// );
/// ```
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: Arc<RwLock<HashMap<String, Arc<Schema>>>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when the name is taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        schema: impl Into<Arc<Schema>>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();
        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        schemas.insert(name, schema.into());
        Ok(())
    }

    /// Retrieves a schema by name, or `None` if not registered.
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.read().get(name).cloned()
    }

    /// Retrieves a schema by name, failing with
    /// [`RegistryError::SchemaNotFound`] when absent.
    ///
    /// Used when wiring nested fields, where a missing schema is a
    /// configuration error rather than an optional lookup.
    pub fn expect(&self, name: &str) -> Result<Arc<Schema>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))
    }

    /// True when a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema under a taken name.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Looked up a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
