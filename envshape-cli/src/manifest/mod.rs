//! Manifest files describing a schema, its environment keys, and examples.
//!
//! A TOML manifest looks like this:
//!
//! ```toml
//! [schema]
//! type = "object"
//!
//! [[schema.fields]]
//! name = "port"
//! type = "integer"
//! coerce = true
//! checks = [{ kind = "range", min = 1, max = 65535 }]
//!
//! [env]
//! port = "API_PORT"
//!
//! [example]
//! API_PORT = 8080
//! ```
//!
//! JSON manifests use the same structure.

mod spec;

use std::collections::BTreeMap;
use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use envshape::{EnvKeyMap, EnvRecord, SchemaNode, merge_config_maps};
use figment::Figment;
use figment::providers::{Format, Json, Toml};
use serde::Deserialize;
use tracing::debug;

pub use spec::{CheckSpec, FieldSpec, NodeSpec, NodeType};

use crate::error::CliError;

/// Parsed manifest.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Root schema node.
    pub schema: NodeSpec,
    /// Environment key for each dotted field path.
    #[serde(default)]
    pub env: EnvKeyMap,
    /// Key maps whose paths are prefixed with the group name.
    #[serde(default)]
    pub groups: BTreeMap<String, EnvKeyMap>,
    /// Example values used when rendering templates.
    #[serde(default)]
    pub example: EnvRecord,
}

#[derive(Clone, Copy, Debug)]
enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    fn from_path(path: &Utf8Path) -> Result<Self, CliError> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnsupportedFormat`] for unknown extensions,
    /// [`CliError::ManifestMissing`] when the file does not exist, and
    /// [`CliError::Manifest`] when parsing fails.
    pub fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let format = ManifestFormat::from_path(path)?;
        let data = read_manifest(path)?;
        Self::parse(path, format, &data)
    }

    /// Parse manifest text. The extension of `path` selects the format.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnsupportedFormat`] or [`CliError::Manifest`].
    pub fn from_str_at(path: &Utf8Path, data: &str) -> Result<Self, CliError> {
        let format = ManifestFormat::from_path(path)?;
        Self::parse(path, format, data)
    }

    fn parse(path: &Utf8Path, format: ManifestFormat, data: &str) -> Result<Self, CliError> {
        let figment = match format {
            ManifestFormat::Toml => Figment::from(Toml::string(data)),
            ManifestFormat::Json => Figment::from(Json::string(data)),
        };
        let manifest: Self = figment.extract().map_err(|err| CliError::Manifest {
            path: path.to_path_buf(),
            source: Box::new(err),
        })?;
        debug!(
            %path,
            keys = manifest.env.len(),
            groups = manifest.groups.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Build the schema the manifest describes.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidSchema`] when a node is inconsistent.
    pub fn schema(&self) -> Result<SchemaNode, CliError> {
        self.schema.to_schema()
    }

    /// The `env` table followed by every group, prefixed with its name.
    ///
    /// Later entries replace earlier ones for the same path.
    #[must_use]
    pub fn key_map(&self) -> EnvKeyMap {
        let mut map = self.env.clone();
        map.extend(merge_config_maps(&self.groups));
        map
    }
}

fn read_manifest(path: &Utf8Path) -> Result<String, CliError> {
    let io_error = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            CliError::ManifestMissing(path.to_path_buf())
        } else {
            CliError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::ManifestMissing(path.to_path_buf()))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}
