//! Primary error enum for configuration loading flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::SchemaValidationError;

/// Errors that can occur while loading configuration or writing templates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvShapeError {
    /// The assembled configuration did not satisfy its schema.
    #[error("configuration failed validation:\n{0}")]
    Validation(#[from] SchemaValidationError),

    /// The validated configuration could not be deserialised into the
    /// requested type.
    #[error("failed to deserialise validated configuration: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Writing an example environment file failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Destination that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the sink.
        #[source]
        source: std::io::Error,
    },
}
