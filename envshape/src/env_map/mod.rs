//! Mapping from configuration field paths to environment variable names.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::FieldPath;

/// Insertion-ordered map from [`FieldPath`] to environment key.
///
/// Inserting a path that is already present replaces its key without moving
/// the entry. Lookups for paths that were never inserted return `None`; the
/// loaders treat that as an undefined value rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvKeyMap {
    entries: Vec<(FieldPath, String)>,
}

impl EnvKeyMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `key` for `path`, returning the key it replaced.
    pub fn insert(&mut self, path: impl Into<FieldPath>, key: impl Into<String>) -> Option<String> {
        let field_path = path.into();
        let env_key = key.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(p, _)| *p == field_path) {
            return Some(std::mem::replace(existing, env_key));
        }
        self.entries.push((field_path, env_key));
        None
    }

    /// Environment key mapped to `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, key)| key.as_str())
    }

    /// Iterate over `(path, key)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.entries.iter().map(|(path, key)| (path, key.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, K> FromIterator<(P, K)> for EnvKeyMap
where
    P: Into<FieldPath>,
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, K)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<P, K> Extend<(P, K)> for EnvKeyMap
where
    P: Into<FieldPath>,
    K: Into<String>,
{
    fn extend<I: IntoIterator<Item = (P, K)>>(&mut self, iter: I) {
        for (path, key) in iter {
            self.insert(path, key);
        }
    }
}

impl IntoIterator for EnvKeyMap {
    type Item = (FieldPath, String);
    type IntoIter = std::vec::IntoIter<(FieldPath, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'de> Deserialize<'de> for EnvKeyMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<String, String>::deserialize(deserializer).map(Self::from_iter)
    }
}

/// Combine named groups of field maps into one map with prefixed paths.
///
/// Every inner path `p` of group `g` becomes `g.p`, including when either
/// side is empty. Entries are emitted in group order, then inner order;
/// group names are expected to be unique, and
/// a repeated output path keeps its first position but takes the later key.
///
/// # Examples
///
/// ```
/// use envshape::{EnvKeyMap, merge_config_maps};
///
/// let api: EnvKeyMap = [("host", "API_HOST")].into_iter().collect();
/// let db: EnvKeyMap = [("url", "DATABASE_URL")].into_iter().collect();
///
/// let merged = merge_config_maps([("api", &api), ("db", &db)]);
/// assert_eq!(merged.get("api.host"), Some("API_HOST"));
/// assert_eq!(merged.get("db.url"), Some("DATABASE_URL"));
/// ```
pub fn merge_config_maps<'a, G, I>(groups: I) -> EnvKeyMap
where
    G: AsRef<str>,
    I: IntoIterator<Item = (G, &'a EnvKeyMap)>,
{
    let mut merged = EnvKeyMap::new();
    for (group, inner) in groups {
        let prefix = group.as_ref();
        for (path, key) in inner.iter() {
            merged.insert(FieldPath::from(format!("{prefix}.{path}")), key);
        }
    }
    merged
}
