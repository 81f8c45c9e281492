//! Raw environment values and the flat record that holds them.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

/// A raw configuration value as it arrives before validation.
///
/// Process environments only ever produce strings, but callers assembling a
/// record by hand (or from a manifest) may also supply numbers, booleans, or
/// explicit nulls. [`EnvValue::Undefined`] stands for "no value at all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnvValue {
    /// Text value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Explicit null.
    Null,
    /// No value was supplied.
    #[default]
    Undefined,
}

static UNDEFINED: EnvValue = EnvValue::Undefined;

impl EnvValue {
    /// Shared reference to [`EnvValue::Undefined`].
    #[must_use]
    pub fn undefined() -> &'static Self {
        &UNDEFINED
    }

    /// Whether this is [`EnvValue::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Convert into the JSON value written into a nested raw config.
    ///
    /// `Undefined` has no JSON counterpart and yields `None`.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::String(text) => Some(Value::String(text.clone())),
            Self::Number(number) => Some(Value::Number(number.clone())),
            Self::Bool(flag) => Some(Value::Bool(*flag)),
            Self::Null => Some(Value::Null),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for EnvValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for EnvValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl<T: Into<Self>> From<Option<T>> for EnvValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::Null),
            Value::Bool(flag) => Ok(Self::Bool(flag)),
            Value::Number(number) => Ok(Self::Number(number)),
            Value::String(text) => Ok(Self::String(text)),
            nested @ (Value::Array(_) | Value::Object(_)) => Err(de::Error::custom(format!(
                "expected a string, number, boolean, or null, found {nested}"
            ))),
        }
    }
}

/// Flat, read-only mapping from environment key to raw value.
///
/// Looking up an absent key yields [`EnvValue::Undefined`] rather than an
/// error; missing values are reported later, by validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct EnvRecord(HashMap<String, EnvValue>);

impl EnvRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process_env() -> Self {
        let mut skipped = 0_usize;
        let record: Self = std::env::vars_os()
            .filter_map(|(key, value)| {
                let pair = key.into_string().ok().zip(value.into_string().ok());
                if pair.is_none() {
                    skipped += 1;
                }
                pair
            })
            .collect();
        if skipped > 0 {
            tracing::debug!(skipped, "ignored non UTF-8 environment variables");
        }
        record
    }

    /// Value stored under `key`, or [`EnvValue::Undefined`].
    #[must_use]
    pub fn get(&self, key: &str) -> &EnvValue {
        self.0.get(key).unwrap_or(&UNDEFINED)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or replace the value under `key`, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Option<EnvValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvRecord
where
    K: Into<String>,
    V: Into<EnvValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
