//! # Alembic
//!
//! A declarative serialization and validation library. Schemas map object
//! attributes to typed fields; each field converts between a native value
//! and a primitive representation, and every conversion error is
//! accumulated so one `load` call reports all failures instead of
//! short-circuiting on the first.
//!
//! ## Overview
//!
//! Error accumulation is built on stillwater's `Validation` type: a field
//! failure produces [`ConversionErrors`], and the schema combines per-field
//! failures applicatively while iterating fields in declaration order.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: location of a value in nested data (e.g. `users[0].email`)
//! - [`ConversionError`] / [`ConversionErrors`]: a single failure with its
//!   path and code, and their non-empty accumulation
//! - [`fields::Field`]: the conversion contract one attribute implements
//! - [`Schema`]: ordered set of named fields orchestrating load and dump
//! - [`ErrorReport`]: the per-field mapping of error messages
//!
//! ## Example
//!
//! ```rust
//! use alembic::fields::{IntegerField, StringField};
//! use alembic::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("name", StringField::new().required().min_len(1))
//!     .field("age", IntegerField::new().required().min(0));
//!
//! let loaded = schema.load(&json!({"name": "Alice", "age": 30}));
//! assert!(loaded.is_success());
//!
//! // Both failures are reported together.
//! let report = schema.validate(&json!({"name": "", "age": -1}));
//! assert_eq!(report.len(), 2);
//! ```

pub mod context;
pub mod error;
pub mod fields;
pub mod messages;
pub mod path;
pub mod registry;
pub mod schema;

pub use context::{Context, ContextGuard};
pub use error::{ConversionError, ConversionErrors, ErrorReport};
pub use messages::MessageCatalog;
pub use path::{FieldPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{Schema, Unknown};

/// Type alias for conversion results accumulating [`ConversionErrors`].
pub type ConversionResult<T> = stillwater::Validation<T, ConversionErrors>;
