//! Error types produced while loading and validating configuration.

mod types;
mod validation;

pub use types::EnvShapeError;
pub use validation::{Issue, IssueKind, SchemaValidationError};
