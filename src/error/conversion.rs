//! Conversion error types.
//!
//! [`ConversionError`] is a single failed conversion with its location and a
//! machine-readable code. [`ConversionErrors`] accumulates them; it is never
//! empty, which is what lets it sit on the failure side of
//! `Validation<T, ConversionErrors>`.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single conversion failure.
///
/// Carries where the failure happened, a resolved human-readable message,
/// and a machine-readable code (`required`, `invalid`, `null`, ...). The
/// code is what instance-level message overrides key on.
///
/// # Example
///
/// ```rust
/// use alembic::{ConversionError, FieldPath};
///
/// let error = ConversionError::new(
///     FieldPath::root().push_field("pin"),
///     "Pin codes must contain only digits.",
/// )
/// .with_code("invalid");
///
/// assert_eq!(error.code, "invalid");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionError {
    /// Path to the value that could not be converted.
    pub path: FieldPath,
    /// Human-readable message, already resolved through the field's
    /// message catalog.
    pub message: String,
    /// Machine-readable error code.
    pub code: String,
}

impl ConversionError {
    /// Creates an error at `path` with the given message.
    ///
    /// The code defaults to `conversion_error`; use [`with_code`] for a
    /// specific one.
    ///
    /// [`with_code`]: ConversionError::with_code
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "conversion_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns a copy of this error with `prefix`'s segments prepended.
    ///
    /// Used when a nested schema's errors are hoisted into the parent's
    /// coordinate space.
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        let mut path = prefix.clone();
        for segment in self.path.segments() {
            path = match segment {
                crate::path::PathSegment::Field(name) => path.push_field(name.clone()),
                crate::path::PathSegment::Index(i) => path.push_index(*i),
            };
        }
        Self {
            path,
            message: self.message.clone(),
            code: self.code.clone(),
        }
    }
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ConversionError {}

/// A non-empty collection of conversion errors.
///
/// Wraps `NonEmptyVec` so a `Validation::Failure` always carries at least
/// one error. Implements `Semigroup` so per-field failures accumulate
/// instead of short-circuiting:
///
/// ```rust
/// use alembic::{ConversionError, ConversionErrors, FieldPath};
/// use stillwater::prelude::*;
///
/// let a = ConversionErrors::single(ConversionError::new(
///     FieldPath::root().push_field("name"),
///     "Missing data for required field.",
/// ));
/// let b = ConversionErrors::single(ConversionError::new(
///     FieldPath::root().push_field("age"),
///     "Not a valid integer.",
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionErrors(NonEmptyVec<ConversionError>);

impl ConversionErrors {
    /// Creates a collection holding one error.
    pub fn single(error: ConversionError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `Vec` of errors.
    ///
    /// # Panics
    ///
    /// Panics if the vec is empty. Callers accumulate into a `Vec` and only
    /// construct this once they know at least one error was recorded.
    pub fn from_vec(errors: Vec<ConversionError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("ConversionErrors requires at least one error"))
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the errors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConversionError> {
        self.0.iter()
    }

    /// The first recorded error.
    pub fn first(&self) -> &ConversionError {
        self.0.head()
    }

    /// All errors at exactly the given path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&ConversionError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// All errors carrying the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ConversionError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Consumes the collection into a plain `Vec`.
    pub fn into_vec(self) -> Vec<ConversionError> {
        self.0.into_vec()
    }

    /// Returns a copy with every error's path prefixed by `prefix`.
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        Self::from_vec(self.iter().map(|e| e.prefixed(prefix)).collect())
    }
}

impl Semigroup for ConversionErrors {
    fn combine(self, other: Self) -> Self {
        ConversionErrors(self.0.combine(other.0))
    }
}

impl Display for ConversionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConversionErrors {}

impl IntoIterator for ConversionErrors {
    type Item = ConversionError;
    type IntoIter = std::vec::IntoIter<ConversionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Schemas are shared across threads, so the errors they produce must move
// freely too.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConversionError>();
    assert_sync::<ConversionError>();
    assert_send::<ConversionErrors>();
    assert_sync::<ConversionErrors>();
};
