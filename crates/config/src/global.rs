//! Process-wide convenience accessors.
//!
//! These free functions forward to one lazily-built [`Settings`] shared by
//! the whole process. Prefer passing a `Settings` explicitly where you can;
//! these exist for call sites that have no context to thread it through.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::de::DeserializeOwned;

use crate::accessor::Settings;
use crate::contract::Config;
use crate::error::ConfigError;

static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::default);

/// Returns the process-wide facade.
pub fn settings() -> &'static Settings {
    &SETTINGS
}

/// Loads the default config if needed. Panics if the file is missing.
pub fn init_config() {
    SETTINGS.init_config();
}

/// Returns the loaded default config, loading it first if needed.
pub fn try_init() -> Result<Arc<dyn Config>, ConfigError> {
    SETTINGS.try_init()
}

pub fn set_config_file(path: impl AsRef<Path>) {
    SETTINGS.set_config_file(path);
}

pub fn set(section: &str, key: &str, value: &str) {
    SETTINGS.set(section, key, value);
}

pub fn clear_config_cache() {
    SETTINGS.clear_config_cache();
}

pub fn get_conf(section: &str, key: &str) -> String {
    SETTINGS.get_conf(section, key)
}

pub fn get_conf_default(section: &str, key: &str, default: &str) -> String {
    SETTINGS.get_conf_default(section, key, default)
}

pub fn get_conf_arr(section: &str, key: &str) -> Vec<String> {
    SETTINGS.get_conf_arr(section, key)
}

pub fn get_conf_string_map(section: &str) -> Option<HashMap<String, String>> {
    SETTINGS.get_conf_string_map(section)
}

pub fn get_conf_array_map(section: &str) -> Option<HashMap<String, Vec<String>>> {
    SETTINGS.get_conf_array_map(section)
}

pub fn conf_map_to_struct<T: DeserializeOwned>(
    section: &str,
    target: &mut T,
) -> Result<(), ConfigError> {
    SETTINGS.conf_map_to_struct(section, target)
}
