//! The format-agnostic configuration contract.
//!
//! Responsibilities:
//! - Define [`Config`], the lookup surface shared by every backend.
//! - Provide typed section decoding on top of the object-safe trait.
//!
//! Does NOT handle:
//! - Parsing files (see `backend/`).
//! - Caching or choosing a backend (see `cache.rs` and `loader.rs`).
//!
//! Invariants:
//! - Absence is never an error: missing sections and keys resolve to the
//!   caller's default, an empty collection, or `Ok(None)`.
//! - Reads are pure functions of the parsed file plus any `set` overlays.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// A parsed configuration file.
///
/// Every value is exposed as a string regardless of how the backend stores
/// it. Native typing is only recovered through `section_object`, which is
/// implemented on `dyn Config`.
///
/// Implementations guard their own state, so a shared `Arc<dyn Config>` can
/// be read and overlaid from several threads.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Returns the value of `key` in `section`, or `default` when either is absent.
    fn must_value(&self, section: &str, key: &str, default: &str) -> String;

    /// Splits the value of `key` in `section` on `delim`.
    ///
    /// An absent or empty value yields an empty vector. Parts are neither
    /// trimmed nor deduplicated. An empty `delim` keeps the value whole.
    fn must_value_array(&self, section: &str, key: &str, delim: &str) -> Vec<String> {
        let value = self.must_value(section, key, "");
        if value.is_empty() {
            return Vec::new();
        }
        if delim.is_empty() {
            return vec![value];
        }
        value.split(delim).map(str::to_string).collect()
    }

    /// Lists the keys of `section`, empty when the section is absent.
    fn key_list(&self, section: &str) -> Vec<String>;

    /// Returns a snapshot of `section`.
    ///
    /// An absent section is `Ok(None)`, not an error.
    fn section(&self, section: &str) -> Result<Option<HashMap<String, String>>, ConfigError>;

    /// Lists every section name known to the backend.
    fn section_list(&self) -> Vec<String>;

    /// Serializes `section` (or the whole file when `section` is empty) as a
    /// YAML document suitable for typed decoding.
    ///
    /// Returns `Ok(None)` when the section is absent.
    fn section_document(&self, section: &str) -> Result<Option<String>, ConfigError>;

    /// Overlays `value` for `key` in `section`, creating the section if needed.
    ///
    /// The overlay lives in memory only and is never written back to disk.
    fn set(&self, section: &str, key: &str, value: &str);
}

impl dyn Config + '_ {
    /// Decodes `section` into `target`.
    ///
    /// An empty `section` decodes the whole file. When the section is absent
    /// `target` is left untouched and `Ok(())` is returned. On success
    /// `target` is replaced wholesale, so types meant for partial sections
    /// should use `#[serde(default)]`.
    pub fn section_object<T>(&self, section: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: DeserializeOwned,
    {
        let Some(document) = self.section_document(section)? else {
            return Ok(());
        };

        *target = serde_yaml::from_str(&document).map_err(|source| ConfigError::Decode {
            section: section.to_string(),
            source,
        })?;
        Ok(())
    }
}
