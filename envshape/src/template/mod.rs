//! Example environment file generation.
//!
//! The generated file documents one variable per schema leaf:
//!
//! ```text
//! #config.hostName
//! API_HOST="test-env-var"
//!
//! #config.port
//! API_PORT=123
//! ```

mod sink;

use std::fmt;

use camino::Utf8Path;
use tracing::debug;

pub use sink::{FileSink, TemplateSink};

use crate::schema::SchemaShape;
use crate::{EnvKeyMap, EnvRecord, EnvShapeError, EnvShapeResult, EnvValue, derive_paths};

/// Display form of an example value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExampleValue<'a> {
    /// Replacement text.
    Text(String),
    /// The original value, rendered with its natural text form.
    Unchanged(&'a EnvValue),
}

impl fmt::Display for ExampleValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Unchanged(value) => write!(f, "{value}"),
        }
    }
}

/// Render `value` as it should appear after `KEY=` in an example file.
///
/// Strings are wrapped in double quotes, `true` becomes `true`, and `false`
/// and null become empty so the variable reads as unset. Numbers and
/// undefined values are returned unchanged.
///
/// # Examples
///
/// ```
/// use envshape::{EnvValue, ExampleValue, format_example_value};
///
/// assert_eq!(format_example_value(&"test".into()).to_string(), "\"test\"");
/// assert_eq!(format_example_value(&false.into()).to_string(), "");
///
/// let port = EnvValue::from(123_i64);
/// assert_eq!(format_example_value(&port), ExampleValue::Unchanged(&port));
/// ```
#[must_use]
pub fn format_example_value(value: &EnvValue) -> ExampleValue<'_> {
    match value {
        EnvValue::String(text) => ExampleValue::Text(format!("\"{text}\"")),
        EnvValue::Bool(true) => ExampleValue::Text("true".to_owned()),
        EnvValue::Bool(false) | EnvValue::Null => ExampleValue::Text(String::new()),
        EnvValue::Number(_) | EnvValue::Undefined => ExampleValue::Unchanged(value),
    }
}

/// Render the example file for `schema`.
///
/// Each derived field path produces a `#config.<path>` comment followed by
/// `<KEY>=<example>`; stanzas are separated by a blank line and the output
/// ends with a newline. Paths without a mapping render their key as
/// `undefined`.
#[must_use]
pub fn generate_string<S>(schema: &S, config_map: &EnvKeyMap, example: &EnvRecord) -> String
where
    S: SchemaShape + ?Sized,
{
    let stanzas: Vec<String> = derive_paths(schema, None)
        .iter()
        .map(|path| {
            let key = config_map.get(path.as_str());
            let value = match key {
                Some(env_key) => example.get(env_key),
                None => EnvValue::undefined(),
            };
            format!(
                "#config.{path}\n{}={}",
                key.unwrap_or("undefined"),
                format_example_value(value)
            )
        })
        .collect();
    format!("{}\n", stanzas.join("\n\n"))
}

/// Inputs for [`generate_config_file`].
#[derive(Debug)]
pub struct TemplateOptions<'a, S: ?Sized> {
    /// Schema whose fields are documented.
    pub schema: &'a S,
    /// Environment key for each field path.
    pub config_map: &'a EnvKeyMap,
    /// Example values, keyed by environment key.
    pub example: &'a EnvRecord,
    /// Destination handed to the sink.
    pub file_path: &'a Utf8Path,
}

/// Render the example file and hand it to `sink` once.
///
/// Returns the rendered contents.
///
/// # Errors
///
/// Returns [`EnvShapeError::Io`] when the sink fails to write.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use envshape::template::{TemplateOptions, TemplateSink, generate_config_file};
/// use envshape::{EnvKeyMap, EnvRecord, SchemaNode};
///
/// #[derive(Default)]
/// struct Capture(Vec<(String, String)>);
///
/// impl TemplateSink for Capture {
///     fn write(&mut self, path: &Utf8Path, contents: &str) -> std::io::Result<()> {
///         self.0.push((path.to_string(), contents.to_owned()));
///         Ok(())
///     }
/// }
///
/// let schema = SchemaNode::object([("port", SchemaNode::number())]);
/// let map: EnvKeyMap = [("port", "PORT")].into_iter().collect();
/// let example: EnvRecord = [("PORT", 8080_i64)].into_iter().collect();
///
/// let mut sink = Capture::default();
/// let contents = generate_config_file(
///     &TemplateOptions {
///         schema: &schema,
///         config_map: &map,
///         example: &example,
///         file_path: Utf8Path::new(".env.example"),
///     },
///     &mut sink,
/// )?;
/// assert_eq!(contents, "#config.port\nPORT=8080\n");
/// assert_eq!(sink.0, [(".env.example".to_owned(), contents)]);
/// # Ok::<_, std::sync::Arc<envshape::EnvShapeError>>(())
/// ```
pub fn generate_config_file<S, W>(
    options: &TemplateOptions<'_, S>,
    sink: &mut W,
) -> EnvShapeResult<String>
where
    S: SchemaShape + ?Sized,
    W: TemplateSink + ?Sized,
{
    let contents = generate_string(options.schema, options.config_map, options.example);
    sink.write(options.file_path, &contents)
        .map_err(|source| EnvShapeError::Io {
            path: options.file_path.to_path_buf(),
            source,
        })?;
    debug!(path = %options.file_path, bytes = contents.len(), "wrote example environment file");
    Ok(contents)
}

#[cfg(test)]
mod tests;
