//! Core crate for `envshape`.
//!
//! `envshape` turns a flat set of environment variables into a nested,
//! validated configuration value. A schema describes the nested shape, an
//! [`EnvKeyMap`] names the environment variable behind every leaf field, and
//! an [`EnvRecord`] supplies the raw values:
//!
//! ```rust
//! use envshape::{EnvKeyMap, EnvRecord, SchemaNode, load_validated_schema};
//! use serde_json::json;
//!
//! let schema = SchemaNode::object([
//!     ("hostName", SchemaNode::string().coerce()),
//!     ("port", SchemaNode::number().coerce()),
//! ]);
//! let map: EnvKeyMap = [("hostName", "API_HOST"), ("port", "API_PORT")]
//!     .into_iter()
//!     .collect();
//! let env: EnvRecord = [("API_HOST", "localhost"), ("API_PORT", "8080")]
//!     .into_iter()
//!     .collect();
//!
//! let config = load_validated_schema(&schema, &map, &env)?;
//! assert_eq!(config, json!({"hostName": "localhost", "port": 8080}));
//! # Ok::<_, envshape::SchemaValidationError>(())
//! ```
//!
//! The same inputs also drive [`template::generate_string`], which renders an
//! example `.env` file documenting every expected variable.

mod env_map;
mod error;
mod field_path;
mod load;
mod paths;
mod result_ext;
pub mod schema;
pub mod template;
mod value;

pub use env_map::{EnvKeyMap, merge_config_maps};
pub use error::{EnvShapeError, Issue, IssueKind, SchemaValidationError};
pub use field_path::{FieldPath, set_path};
pub use load::{load_config_from_environment, load_validated_as, load_validated_schema};
pub use paths::{derive_paths, unwrap_shape};
pub use result_ext::EnvShapeResultExt;
pub use schema::{NodeKind, SchemaNode, SchemaShape, Validate};
pub use template::{ExampleValue, format_example_value};
pub use value::{EnvRecord, EnvValue};

/// Result alias for fallible `envshape` operations.
///
/// Errors are shared behind an [`std::sync::Arc`] so they can be cloned into
/// logs and returned to callers without losing their source chain.
pub type EnvShapeResult<T> = Result<T, std::sync::Arc<EnvShapeError>>;
