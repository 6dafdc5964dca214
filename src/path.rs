//! Paths to values inside nested data.
//!
//! [`FieldPath`] locates the value a conversion error refers to, e.g.
//! `users[0].email`. Paths are built incrementally as a schema descends
//! into nested fields and list elements.

use std::fmt::{self, Display};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Attribute access by field name.
    Field(String),
    /// Element access by list index.
    Index(usize),
}

/// A path to a value in nested data.
///
/// Push methods return a new path rather than mutating, so a schema can
/// hand the same base path to every field it iterates.
///
/// # Example
///
/// ```rust
/// use alembic::FieldPath;
///
/// let path = FieldPath::root().push_index(0).push_field("email");
/// assert_eq!(path.to_string(), "[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, addressing the value being loaded or dumped itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_display_mixes_fields_and_indices() {
        let path = FieldPath::root()
            .push_field("users")
            .push_index(3)
            .push_field("email");
        assert_eq!(path.to_string(), "users[3].email");
    }

    #[test]
    fn test_index_first_display() {
        let path = FieldPath::root().push_index(2).push_field("name");
        assert_eq!(path.to_string(), "[2].name");
    }

    #[test]
    fn test_push_does_not_mutate() {
        let base = FieldPath::root().push_field("items");
        let a = base.push_index(0);
        let b = base.push_index(1);
        assert_eq!(base.to_string(), "items");
        assert_eq!(a.to_string(), "items[0]");
        assert_eq!(b.to_string(), "items[1]");
    }

    #[test]
    fn test_segments_iterator() {
        let path = FieldPath::root().push_field("a").push_index(1);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments[0], &PathSegment::Field("a".to_string()));
        assert_eq!(segments[1], &PathSegment::Index(1));
    }
}
