#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Field-path tracking for partial-validation error reporting.
//!
//! When a model is constructed from untrusted input and some fields fail
//! validation, each failure needs to be reported against the exact field
//! that produced it, including fields of nested models and elements of
//! list fields. [`FieldPath`] is the lightweight breadcrumb trail used for
//! that: an ordered sequence of [`PathSegment`]s that renders as
//! `address.zipcode` or `items[3].name`.
//!
//! Paths are cheap to push/pop while walking a schema, compare and hash by
//! their segments (so they can key ordered maps), and serialize as their
//! human-readable form.

use core::fmt::{self, Write};

/// A single step in a path through a model's field structure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Navigate to a named field of a model.
    Field(String),
    /// Navigate to an element of a list field by index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// A path through a model's field structure, recorded as a series of
/// segments.
///
/// Unlike a static type structure, the schemas this crate serves are
/// runtime data, so segments carry owned field names rather than indices
/// into a type description.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a new empty (root) path.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Create a single-segment path for a named field.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Push a segment onto the path.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Push a named-field segment onto the path.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Field(name.into()));
    }

    /// Push a list-index segment onto the path.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Pop the last segment from the path.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the segments in this path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments in this path.
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this path is empty (the root).
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the leading field segment, if the path starts with one.
    ///
    /// Useful for grouping nested errors under their top-level field.
    pub fn root_field(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Format this path as a human-readable string.
    ///
    /// Returns a path like `address.zipcode` or `items[3].name`;
    /// the empty path renders as `<root>`.
    pub fn format(&self) -> String {
        if self.segments.is_empty() {
            return String::from("<root>");
        }
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => {
                    if !result.is_empty() {
                        result.push('.');
                    }
                    result.push_str(name);
                }
                PathSegment::Index(idx) => {
                    write!(result, "[{idx}]").unwrap();
                }
            }
        }
        result
    }

    /// Parse a path from its human-readable form.
    ///
    /// Accepts the same notation [`format`](Self::format) produces:
    /// dot-separated field names with optional `[n]` index suffixes.
    /// `<root>` and the empty string parse to the empty path. Bracket text
    /// that is not a valid index (`a[x]`) stays attached to the field name
    /// as a single segment, so `parse` and [`format`](Self::format) always
    /// round-trip without losing input.
    pub fn parse(input: &str) -> Self {
        let mut path = Self::new();
        if input.is_empty() || input == "<root>" {
            return path;
        }
        for part in input.split('.') {
            let (name, rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            let indices: Option<Vec<usize>> = rest
                .split('[')
                .filter(|group| !group.is_empty())
                .map(|group| {
                    group
                        .strip_suffix(']')
                        .and_then(|digits| digits.parse::<usize>().ok())
                })
                .collect();
            match indices {
                Some(indices) => {
                    if !name.is_empty() {
                        path.push_field(name);
                    }
                    for index in indices {
                        path.push_index(index);
                    }
                }
                None => path.push_field(part),
            }
        }
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<&str> for FieldPath {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl serde::Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.format())
    }
}
