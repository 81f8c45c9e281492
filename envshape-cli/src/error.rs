//! Error types for the `envshape` CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use envshape::{EnvShapeError, SchemaValidationError};
use thiserror::Error;

/// Errors surfaced by `envshape` commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The manifest file does not exist.
    #[error("manifest not found at {0}")]
    ManifestMissing(Utf8PathBuf),

    /// The manifest extension is neither `.toml` nor `.json`.
    #[error("unsupported manifest format for {0}; expected a .toml or .json file")]
    UnsupportedFormat(Utf8PathBuf),

    /// The manifest could not be parsed.
    #[error("failed to parse manifest {path}: {source}")]
    Manifest {
        /// Manifest that failed to parse.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<figment::Error>,
    },

    /// A schema node in the manifest is inconsistent.
    #[error("invalid schema at {path}: {message}")]
    InvalidSchema {
        /// Dotted location of the node, or `(root)`.
        path: String,
        /// What is wrong with the node.
        message: String,
    },

    /// The environment does not satisfy the schema.
    #[error("environment failed validation:\n{0}")]
    Validation(#[from] SchemaValidationError),

    /// Failure reported by the core library.
    #[error(transparent)]
    Core(#[from] Arc<EnvShapeError>),

    /// The validated configuration could not be encoded.
    #[error("failed to encode configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
