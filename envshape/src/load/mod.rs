//! Assembly of nested configuration from flat environment records.
//!
//! Loading runs in two steps. [`load_config_from_environment`] derives the
//! schema's field paths, looks up each path's environment key and value, and
//! writes the raw value at its dotted position. [`load_validated_schema`]
//! then hands the assembled value to the schema's own [`Validate::parse`].
//! The assembly step never converts values; all coercion belongs to the
//! schema.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::schema::{SchemaShape, Validate};
use crate::{
    EnvKeyMap, EnvRecord, EnvShapeResult, EnvShapeResultExt, EnvValue, SchemaValidationError,
    derive_paths, set_path,
};

/// Build the nested raw configuration for `schema` from `env`.
///
/// Paths with no entry in `map`, and keys with no value in `env`, are not
/// errors here: they leave an undefined leaf (an absent key) in the result,
/// and any failure is deferred to validation.
///
/// # Examples
///
/// ```
/// use envshape::{EnvKeyMap, EnvRecord, SchemaNode, load_config_from_environment};
/// use serde_json::json;
///
/// let schema = SchemaNode::object([
///     ("db", SchemaNode::object([("url", SchemaNode::string())])),
///     ("debug", SchemaNode::boolean()),
/// ]);
/// let map: EnvKeyMap = [("db.url", "DATABASE_URL"), ("debug", "DEBUG")]
///     .into_iter()
///     .collect();
/// let env: EnvRecord = [("DATABASE_URL", "postgres://db")].into_iter().collect();
///
/// let raw = load_config_from_environment(&schema, &map, &env);
/// assert_eq!(raw, json!({"db": {"url": "postgres://db"}}));
/// ```
#[must_use]
pub fn load_config_from_environment<S>(schema: &S, map: &EnvKeyMap, env: &EnvRecord) -> Value
where
    S: SchemaShape + ?Sized,
{
    let paths = derive_paths(schema, None);
    debug!(paths = paths.len(), "assembling configuration from environment");

    let mut raw = Value::Object(Map::new());
    for path in &paths {
        let value = match map.get(path.as_str()) {
            Some(key) => {
                let found = env.get(key);
                if found.is_undefined() {
                    trace!(%path, key, "environment variable not set");
                }
                found
            }
            None => {
                trace!(%path, "field has no environment mapping");
                EnvValue::undefined()
            }
        };
        set_path(&mut raw, path, value.to_json());
    }
    raw
}

/// Assemble the raw configuration and validate it against `schema`.
///
/// # Errors
///
/// Returns the schema's [`SchemaValidationError`] unchanged when the
/// assembled value is rejected, for example when a required variable is
/// missing or cannot be coerced to its declared type.
///
/// # Examples
///
/// ```
/// use envshape::{EnvKeyMap, EnvRecord, SchemaNode, load_validated_schema};
///
/// let schema = SchemaNode::object([("port", SchemaNode::number().coerce())]);
/// let map: EnvKeyMap = [("port", "API_PORT")].into_iter().collect();
///
/// let err = load_validated_schema(&schema, &map, &EnvRecord::new())
///     .expect_err("API_PORT is required");
/// assert!(err.has_issue_at("port"));
/// ```
pub fn load_validated_schema<S>(
    schema: &S,
    map: &EnvKeyMap,
    env: &EnvRecord,
) -> Result<Value, SchemaValidationError>
where
    S: SchemaShape + Validate + ?Sized,
{
    let raw = load_config_from_environment(schema, map, env);
    schema.parse(&raw).inspect_err(|err| {
        debug!(issues = err.len(), "environment configuration failed validation");
    })
}

/// Validate configuration from `env` and deserialise it into `T`.
///
/// # Errors
///
/// Returns [`crate::EnvShapeError::Validation`] when validation fails, and
/// [`crate::EnvShapeError::Deserialize`] when the validated value does not
/// fit `T`.
///
/// # Examples
///
/// ```
/// use envshape::{EnvKeyMap, EnvRecord, SchemaNode, load_validated_as};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Api {
///     port: u16,
/// }
///
/// let schema = SchemaNode::object([("port", SchemaNode::integer().coerce())]);
/// let map: EnvKeyMap = [("port", "API_PORT")].into_iter().collect();
/// let env: EnvRecord = [("API_PORT", "8080")].into_iter().collect();
///
/// let api: Api = load_validated_as(&schema, &map, &env)?;
/// assert_eq!(api.port, 8080);
/// # Ok::<_, std::sync::Arc<envshape::EnvShapeError>>(())
/// ```
pub fn load_validated_as<T, S>(schema: &S, map: &EnvKeyMap, env: &EnvRecord) -> EnvShapeResult<T>
where
    T: DeserializeOwned,
    S: SchemaShape + Validate + ?Sized,
{
    let validated = load_validated_schema(schema, map, env).into_envshape()?;
    serde_json::from_value(validated).into_envshape()
}
