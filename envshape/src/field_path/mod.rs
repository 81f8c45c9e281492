//! Dotted field paths and the builder that writes values at them.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dot-joined sequence of field names locating one position in a nested
/// configuration, for example `database.pool.size`.
///
/// The empty path identifies the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Whether this is the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path with one more field name.
    ///
    /// # Examples
    ///
    /// ```
    /// use envshape::FieldPath;
    ///
    /// assert_eq!(FieldPath::root().child("a").child("b").as_str(), "a.b");
    /// ```
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.is_root() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Field names making up the path, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|_| !self.is_root())
    }

    /// The path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Write `value` into `root` at `path`, creating intermediate objects on
/// demand.
///
/// Non-object values met along the way (including `root` itself) are replaced
/// by empty objects. A `None` value leaves the intermediate objects in place
/// but removes the leaf, which is how an undefined environment value is
/// represented in the assembled configuration. Writing at the root path is a
/// no-op.
///
/// # Examples
///
/// ```
/// use envshape::{FieldPath, set_path};
/// use serde_json::json;
///
/// let mut raw = json!({});
/// set_path(&mut raw, &FieldPath::from("db.pool.size"), Some(json!(4)));
/// set_path(&mut raw, &FieldPath::from("db.url"), None);
/// assert_eq!(raw, json!({"db": {"pool": {"size": 4}}}));
/// ```
pub fn set_path(root: &mut Value, path: &FieldPath, value: Option<Value>) {
    let segments: Vec<&str> = path.segments().collect();
    write_segments(root, &segments, value);
}

fn write_segments(target: &mut Value, segments: &[&str], value: Option<Value>) {
    if segments.is_empty() {
        return;
    }
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Some(map) = target.as_object_mut() else {
        return;
    };

    match segments {
        [leaf] => match value {
            Some(leaf_value) => {
                map.insert((*leaf).to_owned(), leaf_value);
            }
            None => {
                map.remove(*leaf);
            }
        },
        [head, rest @ ..] => {
            let child = map
                .entry((*head).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            write_segments(child, rest, value);
        }
        [] => {}
    }
}
