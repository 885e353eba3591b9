//! YAML-backed configuration.
//!
//! Top-level keys are sections and each section is expected to be a
//! mapping. Keys and scalar values are coerced to strings on lookup;
//! sequences, nested mappings and nulls read back as `""`.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use serde::Serialize;
use serde::de::Error as _;
use serde_yaml::{Mapping, Value};

use super::yaml_value;
use crate::contract::Config;
use crate::error::ConfigError;

/// A parsed YAML document plus any in-memory overlays.
pub struct YamlConfig {
    path: PathBuf,
    data: RwLock<Mapping>,
}

/// Coerces a YAML node to its string form.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Tagged(tagged) => coerce(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

fn find<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| coerce(k) == key)
        .map(|(_, v)| v)
}

/// Returns the existing key that coerces to `key`, or a new string key.
///
/// Reusing the existing node keeps an overlaid entry in its original position.
fn matching_key(mapping: &Mapping, key: &str) -> Value {
    mapping
        .keys()
        .find(|k| coerce(k) == key)
        .cloned()
        .unwrap_or_else(|| Value::String(key.to_string()))
}

fn encode<T: Serialize + ?Sized>(section: &str, value: &T) -> Result<String, ConfigError> {
    serde_yaml::to_string(value).map_err(|source| ConfigError::Encode {
        section: section.to_string(),
        source,
    })
}

impl YamlConfig {
    /// Parses `content`, recording `path` for diagnostics.
    ///
    /// An empty document is an empty config; any other non-mapping
    /// top level is a parse error.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        if content.trim().is_empty() {
            return Ok(Self {
                path,
                data: RwLock::new(Mapping::new()),
            });
        }

        let parse_error = |source| ConfigError::YamlParse {
            path: path.clone(),
            source,
        };
        let data = match serde_yaml::from_str::<Value>(content).map_err(parse_error)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => {
                return Err(parse_error(serde_yaml::Error::custom(
                    "top level of a config document must be a mapping",
                )));
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Returns the path this config was parsed from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, Mapping> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlConfig")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Config for YamlConfig {
    fn must_value(&self, section: &str, key: &str, default: &str) -> String {
        let data = self.read();
        match find(&data, section) {
            Some(Value::Mapping(entries)) => find(entries, key)
                .map_or_else(|| default.to_string(), coerce),
            _ => default.to_string(),
        }
    }

    fn key_list(&self, section: &str) -> Vec<String> {
        let data = self.read();
        match find(&data, section) {
            Some(Value::Mapping(entries)) => entries.keys().map(coerce).collect(),
            _ => Vec::new(),
        }
    }

    fn section(&self, section: &str) -> Result<Option<HashMap<String, String>>, ConfigError> {
        let data = self.read();
        Ok(match find(&data, section) {
            Some(Value::Mapping(entries)) => Some(
                entries
                    .iter()
                    .map(|(key, value)| (coerce(key), coerce(value)))
                    .collect(),
            ),
            _ => None,
        })
    }

    fn section_list(&self) -> Vec<String> {
        self.read().keys().map(coerce).collect()
    }

    fn section_document(&self, section: &str) -> Result<Option<String>, ConfigError> {
        let data = self.read();

        if section.is_empty() {
            return encode(section, &*data).map(Some);
        }
        match find(&data, section) {
            Some(value) => encode(section, value).map(Some),
            None => Ok(None),
        }
    }

    fn set(&self, section: &str, key: &str, value: &str) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);

        let section_key = matching_key(&data, section);
        let slot = data
            .entry(section_key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !slot.is_mapping() {
            *slot = Value::Mapping(Mapping::new());
        }

        if let Value::Mapping(entries) = slot {
            let key = matching_key(entries, key);
            entries.insert(key, yaml_value(value));
        }
    }
}
