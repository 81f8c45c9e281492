//! Structured validation failures reported by [`crate::Validate::parse`].

use std::fmt;

use thiserror::Error;

use crate::FieldPath;

/// Reason a single value failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum IssueKind {
    /// No value was supplied for a field that requires one.
    Required,
    /// The value could not be read or coerced as the declared type.
    InvalidType {
        /// Type the schema declares.
        expected: &'static str,
        /// Type actually encountered.
        received: &'static str,
    },
    /// A number was supplied where an integer is required.
    NotInteger,
    /// A refinement predicate rejected the value.
    Refinement(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::InvalidType { expected, received } => {
                write!(f, "Expected {expected}, received {received}")
            }
            Self::NotInteger => f.write_str("Expected integer, received float"),
            Self::Refinement(message) => f.write_str(message),
        }
    }
}

/// One failing position within the validated input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    /// Field path of the failing value; empty for the root.
    pub path: FieldPath,
    /// Why the value failed.
    pub kind: IssueKind,
}

impl Issue {
    /// Create an issue at `path`.
    #[must_use]
    pub const fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// Every issue found while validating one input against a schema.
///
/// Validation does not stop at the first failure, so a single error lists
/// every missing variable and every value that could not be coerced.
///
/// # Examples
///
/// ```
/// use envshape::{FieldPath, Issue, IssueKind, SchemaValidationError};
///
/// let err = SchemaValidationError::new(vec![
///     Issue::new(FieldPath::from("port"), IssueKind::Required),
/// ]);
/// assert_eq!(err.to_string(), "1: port: Required");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
pub struct SchemaValidationError(Vec<Issue>);

impl SchemaValidationError {
    /// Wrap a list of issues.
    #[must_use]
    pub const fn new(issues: Vec<Issue>) -> Self {
        Self(issues)
    }

    /// The issues in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.0
    }

    /// Number of issues.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no issues were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any issue was reported for `path`.
    #[must_use]
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.0.iter().any(|issue| issue.path.as_str() == path)
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {issue}", i + 1)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SchemaValidationError {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
