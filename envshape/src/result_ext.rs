//! Extension for mapping errors to `EnvShapeResult` concisely.
//!
//! Replaces repetitive `.map_err(|e| Arc::new(EnvShapeError::from(e)))`
//! chains when converting validation, serde, or I/O failures into the
//! crate's `EnvShapeResult<T>` alias (`Result<T, Arc<EnvShapeError>>`).
//!
//! # Examples
//!
//! ```
//! use envshape::{EnvShapeResult, EnvShapeResultExt};
//!
//! fn port() -> EnvShapeResult<u16> {
//!     // serde_json::Error implements Into<EnvShapeError>
//!     serde_json::from_str("8080").into_envshape()
//! }
//! # assert_eq!(port().ok(), Some(8080));
//! ```

use std::sync::Arc;

use crate::{EnvShapeError, EnvShapeResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<EnvShapeError>` into an `EnvShapeResult<T>`.
pub trait EnvShapeResultExt<T, E> {
    /// Convert `Result<T, E>` into `EnvShapeResult<T>` using
    /// `Into<EnvShapeError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<EnvShapeError>`.
    fn into_envshape(self) -> EnvShapeResult<T>;
}

impl<T, E> EnvShapeResultExt<T, E> for Result<T, E>
where
    E: Into<EnvShapeError>,
{
    fn into_envshape(self) -> EnvShapeResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
