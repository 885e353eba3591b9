//! INI-backed configuration.
//!
//! Parsing is delegated to `rust-ini`; this module only maps its
//! section/key model onto [`Config`]. The unnamed leading section is
//! addressed as `""` or `"DEFAULT"` by the scalar lookups.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use ini::{Ini, Properties};

use super::yaml_scalar;
use crate::constants::DEFAULT_SECTION;
use crate::contract::Config;
use crate::error::ConfigError;

/// A parsed INI file plus any in-memory overlays.
pub struct IniConfig {
    path: PathBuf,
    data: RwLock<Ini>,
}

impl IniConfig {
    /// Parses `content`, recording `path` for diagnostics.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let data = Ini::load_from_str(content).map_err(|source| ConfigError::IniParse {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Returns the path this config was parsed from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, Ini> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for IniConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IniConfig")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn section_name(section: &str) -> Option<&str> {
    if section.is_empty() || section == DEFAULT_SECTION {
        None
    } else {
        Some(section)
    }
}

fn quoted(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Renders each key once with its first value, matching `must_value`.
fn render_properties(doc: &mut String, props: &Properties, indent: &str) {
    let mut seen = HashSet::new();
    for (key, value) in props.iter() {
        if !seen.insert(key) {
            continue;
        }
        doc.push_str(indent);
        doc.push_str(&quoted(key));
        doc.push_str(": ");
        doc.push_str(&yaml_scalar(value));
        doc.push('\n');
    }
}

fn is_empty(props: &Properties) -> bool {
    props.iter().next().is_none()
}

impl Config for IniConfig {
    fn must_value(&self, section: &str, key: &str, default: &str) -> String {
        self.read()
            .section(section_name(section))
            .and_then(|props| props.get(key))
            .map_or_else(|| default.to_string(), str::to_string)
    }

    fn key_list(&self, section: &str) -> Vec<String> {
        self.read()
            .section(section_name(section))
            .map(|props| props.iter().map(|(key, _)| key.to_string()).collect())
            .unwrap_or_default()
    }

    fn section(&self, section: &str) -> Result<Option<HashMap<String, String>>, ConfigError> {
        Ok(self.read().section(section_name(section)).map(|props| {
            props
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        }))
    }

    fn section_list(&self) -> Vec<String> {
        let data = self.read();
        let mut names: Vec<String> = Vec::new();

        for (name, props) in data.iter() {
            let name = match name {
                Some(name) => name,
                None if !is_empty(props) => DEFAULT_SECTION,
                None => continue,
            };
            if !names.iter().any(|known| known == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    fn section_document(&self, section: &str) -> Result<Option<String>, ConfigError> {
        let data = self.read();
        let mut doc = String::new();

        if section.is_empty() {
            let mut seen = HashSet::new();
            for (name, props) in data.iter() {
                // A repeated section name resolves to its first block.
                if !seen.insert(name) {
                    continue;
                }
                match name {
                    None => render_properties(&mut doc, props, ""),
                    Some(name) if is_empty(props) => {
                        doc.push_str(&format!("{}: {{}}\n", quoted(name)));
                    }
                    Some(name) => {
                        doc.push_str(&format!("{}:\n", quoted(name)));
                        render_properties(&mut doc, props, "  ");
                    }
                }
            }
        } else {
            let Some(props) = data.section(section_name(section)) else {
                return Ok(None);
            };
            render_properties(&mut doc, props, "");
        }

        if doc.is_empty() {
            doc.push_str("{}");
        }
        Ok(Some(doc))
    }

    fn set(&self, section: &str, key: &str, value: &str) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.with_section(section_name(section)).set(key, value);
    }
}
