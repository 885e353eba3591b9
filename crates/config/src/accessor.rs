//! Lazily-initialized default config and its forgiving accessors.
//!
//! Responsibilities:
//! - Track which file is the default config and whether it is loaded.
//! - Expose lookups that never fail: on any config problem they log and
//!   return an empty value.
//! - Expose `try_init` / `current` for callers that need the real error.
//!
//! Does NOT handle:
//! - Parsing or caching (delegated to [`ConfigCache`]).
//!
//! Invariants:
//! - State moves Uninitialized -> Ready or Failed on first access.
//!   `set_config_file` and `clear_config_cache` move it back to Uninitialized.
//!   Failed retries the load on the next access.
//! - A Ready config is only published after parsing completes.
//! - A Ready config from an older cache generation counts as Uninitialized,
//!   so clearing a shared cache forces a reload here too.
//! - Lock order is facade state, then cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;

use crate::cache::ConfigCache;
use crate::constants::{DEFAULT_ARRAY_DELIMITER, DEFAULT_CONFIG_FILE};
use crate::contract::Config;
use crate::error::ConfigError;
use crate::loader;

/// Observable initialization state of a [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// Nothing loaded yet, or reset by `set_config_file` / `clear_config_cache`.
    Uninitialized,
    /// The default config is loaded.
    Ready,
    /// The last load attempt failed; the next access retries.
    Failed,
}

#[derive(Debug)]
enum Phase {
    Uninitialized,
    Ready {
        generation: u64,
        config: Arc<dyn Config>,
    },
    Failed,
}

#[derive(Debug)]
struct State {
    specified: Option<PathBuf>,
    phase: Phase,
}

/// The default-config facade.
///
/// One `Settings` owns the notion of "the" config file for its users. The
/// process-wide instance lives in `global.rs`; tests and embedders build
/// their own with [`Settings::new`].
#[derive(Debug)]
pub struct Settings {
    cache: Arc<ConfigCache>,
    default_path: PathBuf,
    state: RwLock<State>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Arc::new(ConfigCache::new()))
    }
}

impl Settings {
    /// Creates a facade over `cache` using the built-in default path.
    pub fn new(cache: Arc<ConfigCache>) -> Self {
        Self {
            cache,
            default_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            state: RwLock::new(State {
                specified: None,
                phase: Phase::Uninitialized,
            }),
        }
    }

    /// Replaces the built-in default path used when no file has been set.
    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Returns the cache this facade loads through.
    pub fn cache(&self) -> &Arc<ConfigCache> {
        &self.cache
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn effective_path(&self, state: &State) -> PathBuf {
        state
            .specified
            .clone()
            .unwrap_or_else(|| self.default_path.clone())
    }

    /// Returns the file the next load would read, after suffix resolution.
    pub fn config_path(&self) -> PathBuf {
        let state = self.read_state();
        loader::resolve(&self.effective_path(&state)).0
    }

    fn ready(&self, phase: &Phase) -> Option<Arc<dyn Config>> {
        match phase {
            Phase::Ready { generation, config } if *generation == self.cache.generation() => {
                Some(Arc::clone(config))
            }
            _ => None,
        }
    }

    /// Returns the loaded default config without triggering a load.
    pub fn current(&self) -> Option<Arc<dyn Config>> {
        self.ready(&self.read_state().phase)
    }

    /// Reports the initialization state.
    pub fn status(&self) -> InitStatus {
        let state = self.read_state();
        match &state.phase {
            Phase::Ready { .. } if self.ready(&state.phase).is_some() => InitStatus::Ready,
            Phase::Failed => InitStatus::Failed,
            _ => InitStatus::Uninitialized,
        }
    }

    /// Loads the default config if needed and returns it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if the file does not exist, or the
    /// load error if it cannot be read or parsed. Either way the state
    /// becomes Failed and the next call tries again.
    pub fn try_init(&self) -> Result<Arc<dyn Config>, ConfigError> {
        if let Some(config) = self.current() {
            return Ok(config);
        }

        let mut state = self.write_state();
        if let Some(config) = self.ready(&state.phase) {
            return Ok(config);
        }

        let path = loader::resolve(&self.effective_path(&state)).0;
        tracing::info!(path = %path.display(), "Initializing config");

        if !path.exists() {
            state.phase = Phase::Failed;
            return Err(ConfigError::Missing { path });
        }

        let generation = self.cache.generation();
        match self.cache.get_or_load(&path) {
            Ok(config) => {
                state.phase = Phase::Ready {
                    generation,
                    config: Arc::clone(&config),
                };
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Config error");
                state.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    /// Loads the default config if needed.
    ///
    /// Parse failures are logged and leave the facade degraded.
    ///
    /// # Panics
    /// Panics if the config file does not exist. A missing baseline config
    /// is unrecoverable.
    pub fn init_config(&self) {
        if let Err(ConfigError::Missing { path }) = self.try_init() {
            panic!("cannot open config file: {}", path.display());
        }
    }

    /// Points the facade at `path`; the next access reloads from it.
    pub fn set_config_file(&self, path: impl AsRef<Path>) {
        let mut state = self.write_state();
        state.specified = Some(path.as_ref().to_path_buf());
        state.phase = Phase::Uninitialized;
    }

    /// Clears the cache and the default config, forcing a full reload.
    pub fn clear_config_cache(&self) {
        let mut state = self.write_state();
        self.cache.clear();
        state.phase = Phase::Uninitialized;
    }

    fn loaded(&self) -> Option<Arc<dyn Config>> {
        self.init_config();
        self.current()
    }

    /// Overlays `value` on the default config; a no-op if it is unavailable.
    pub fn set(&self, section: &str, key: &str, value: &str) {
        match self.loaded() {
            Some(config) => config.set(section, key, value),
            None => tracing::warn!(section, key, "Config unavailable, value not set"),
        }
    }

    /// Returns the value of `key` in `section`, or `""`.
    pub fn get_conf(&self, section: &str, key: &str) -> String {
        self.get_conf_default(section, key, "")
    }

    /// Returns the value of `key` in `section`, or `default` when absent.
    ///
    /// Returns `""` (not `default`) when the config itself is unavailable.
    pub fn get_conf_default(&self, section: &str, key: &str, default: &str) -> String {
        match self.loaded() {
            Some(config) => config.must_value(section, key, default),
            None => {
                tracing::warn!(section, key, "Config unavailable, returning empty value");
                String::new()
            }
        }
    }

    /// Returns the value of `key` in `section` split on spaces.
    pub fn get_conf_arr(&self, section: &str, key: &str) -> Vec<String> {
        match self.loaded() {
            Some(config) => config.must_value_array(section, key, DEFAULT_ARRAY_DELIMITER),
            None => {
                tracing::warn!(section, key, "Config unavailable, returning empty array");
                Vec::new()
            }
        }
    }

    /// Returns `section` as a map.
    ///
    /// `None` means the config is unavailable or the section is absent.
    pub fn get_conf_string_map(&self, section: &str) -> Option<HashMap<String, String>> {
        let Some(config) = self.loaded() else {
            tracing::warn!(section, "Config unavailable, returning no section");
            return None;
        };

        match config.section(section) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(section, error = %e, "Failed to read section");
                Some(HashMap::new())
            }
        }
    }

    /// Returns every key of `section` with its value split on spaces.
    ///
    /// `None` means the config is unavailable; an absent section is an
    /// empty map.
    pub fn get_conf_array_map(&self, section: &str) -> Option<HashMap<String, Vec<String>>> {
        let Some(config) = self.loaded() else {
            tracing::warn!(section, "Config unavailable, returning no section");
            return None;
        };

        Some(
            config
                .key_list(section)
                .into_iter()
                .map(|key| {
                    let values = config.must_value_array(section, &key, DEFAULT_ARRAY_DELIMITER);
                    (key, values)
                })
                .collect(),
        )
    }

    /// Decodes `section` (or the whole file when empty) into `target`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Unavailable`] when the default config could not
    /// be loaded, and [`ConfigError::Decode`] on a shape mismatch. An absent
    /// section is `Ok(())` with `target` untouched.
    pub fn conf_map_to_struct<T>(&self, section: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: DeserializeOwned,
    {
        let Some(config) = self.loaded() else {
            tracing::warn!(section, "Config unavailable, nothing decoded");
            return Err(ConfigError::Unavailable {
                path: self.config_path(),
            });
        };
        config.section_object(section, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::write_file;
    use serde::Deserialize;
    use tempfile::tempdir;

    const INI: &str = "\
[goconfig]
hosts = 127.0.0.1 127.0.0.2 127.0.0.3
port = 8080

[goconfigStringMap]
name = goconfig
";

    fn settings_for(path: &Path) -> Settings {
        let settings = Settings::default();
        settings.set_config_file(path);
        settings
    }

    #[test]
    fn test_lazy_init_on_first_access() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&path);

        assert_eq!(settings.status(), InitStatus::Uninitialized);
        assert_eq!(
            settings.get_conf("goconfig", "hosts"),
            "127.0.0.1 127.0.0.2 127.0.0.3"
        );
        assert_eq!(settings.status(), InitStatus::Ready);
        assert_eq!(settings.get_conf_arr("goconfig", "hosts").len(), 3);
        assert_eq!(settings.cache().load_count(), 1);
    }

    #[test]
    fn test_default_path_is_used_without_explicit_file() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf/conf.ini", INI);
        let settings = Settings::default().with_default_path(&path);

        assert_eq!(settings.config_path(), path);
        assert_eq!(settings.get_conf("goconfig", "port"), "8080");
    }

    #[test]
    fn test_suffixless_path_resolves_to_ini() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&dir.path().join("conf"));

        assert_eq!(settings.get_conf("goconfig", "port"), "8080");
    }

    #[test]
    fn test_get_conf_default_fallback() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&path);

        assert_eq!(settings.get_conf_default("goconfig", "absent", "dflt"), "dflt");
        assert_eq!(settings.get_conf_default("goconfig", "port", "dflt"), "8080");
    }

    #[test]
    fn test_maps() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&path);

        let strings = settings.get_conf_string_map("goconfigStringMap").unwrap();
        assert_eq!(strings["name"], "goconfig");
        assert!(settings.get_conf_string_map("absent").is_none());

        let arrays = settings.get_conf_array_map("goconfig").unwrap();
        assert_eq!(arrays["hosts"].len(), 3);
        assert_eq!(arrays["port"], vec!["8080"]);
        assert!(settings.get_conf_array_map("absent").unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot open config file")]
    fn test_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let settings = settings_for(&dir.path().join("absent.ini"));
        settings.init_config();
    }

    #[test]
    #[should_panic(expected = "cannot open config file")]
    fn test_missing_default_file_is_fatal_on_first_access() {
        let dir = tempdir().unwrap();
        let settings = Settings::default().with_default_path(dir.path().join("conf/conf.ini"));
        settings.get_conf("goconfig", "port");
    }

    #[test]
    fn test_missing_default_file_via_try_init() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("conf/conf");
        let settings = Settings::default().with_default_path(&missing);

        let err = settings.try_init().unwrap_err();
        assert!(
            matches!(&err, ConfigError::Missing { path } if *path == dir.path().join("conf/conf.ini"))
        );
        assert_eq!(settings.status(), InitStatus::Failed);
    }

    #[test]
    fn test_missing_file_via_try_init() {
        let dir = tempdir().unwrap();
        let settings = settings_for(&dir.path().join("absent.ini"));

        assert!(settings.try_init().unwrap_err().is_missing());
        assert_eq!(settings.status(), InitStatus::Failed);
    }

    #[test]
    fn test_parse_failure_degrades_and_retries() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.yaml", "goconfig: [unclosed");
        let settings = settings_for(&path);

        assert_eq!(settings.get_conf("goconfig", "hosts"), "");
        assert!(settings.get_conf_arr("goconfig", "hosts").is_empty());
        assert!(settings.get_conf_string_map("goconfig").is_none());
        assert!(settings.get_conf_array_map("goconfig").is_none());
        assert_eq!(settings.get_conf_default("goconfig", "hosts", "dflt"), "");
        assert_eq!(settings.status(), InitStatus::Failed);

        write_file(dir.path(), "conf.yaml", "goconfig:\n  hosts: a b\n");
        assert_eq!(settings.get_conf("goconfig", "hosts"), "a b");
        assert_eq!(settings.status(), InitStatus::Ready);
    }

    #[test]
    fn test_set_config_file_switches_files() {
        let dir = tempdir().unwrap();
        let first = write_file(dir.path(), "first.ini", "[s]\nk = first\n");
        let second = write_file(dir.path(), "second.yaml", "s:\n  k: second\n");
        let settings = settings_for(&first);

        assert_eq!(settings.get_conf("s", "k"), "first");
        settings.set_config_file(&second);
        assert_eq!(settings.status(), InitStatus::Uninitialized);
        assert_eq!(settings.get_conf("s", "k"), "second");

        // Switching back is served from the cache.
        settings.set_config_file(&first);
        assert_eq!(settings.get_conf("s", "k"), "first");
        assert_eq!(settings.cache().load_count(), 2);
    }

    #[test]
    fn test_set_overlay_is_memory_only() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&path);

        settings.set("goconfig", "hosts", "9.9.9.9");
        assert_eq!(settings.get_conf("goconfig", "hosts"), "9.9.9.9");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), INI);

        settings.clear_config_cache();
        assert_eq!(
            settings.get_conf("goconfig", "hosts"),
            "127.0.0.1 127.0.0.2 127.0.0.3"
        );
    }

    #[test]
    fn test_clear_reparses_changed_file() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", "[s]\nk = old\n");
        let settings = settings_for(&path);
        assert_eq!(settings.get_conf("s", "k"), "old");

        write_file(dir.path(), "conf.ini", "[s]\nk = new\n");
        assert_eq!(settings.get_conf("s", "k"), "old");

        settings.clear_config_cache();
        assert_eq!(settings.status(), InitStatus::Uninitialized);
        assert_eq!(settings.get_conf("s", "k"), "new");
    }

    #[test]
    fn test_clearing_shared_cache_resets_facade() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", "[s]\nk = old\n");
        let cache = Arc::new(ConfigCache::new());
        let settings = Settings::new(Arc::clone(&cache));
        settings.set_config_file(&path);
        assert_eq!(settings.get_conf("s", "k"), "old");

        write_file(dir.path(), "conf.ini", "[s]\nk = new\n");
        cache.clear();
        assert!(settings.current().is_none());
        assert_eq!(settings.get_conf("s", "k"), "new");
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Server {
        hosts: String,
        port: u16,
    }

    #[test]
    fn test_conf_map_to_struct() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.ini", INI);
        let settings = settings_for(&path);

        let mut server = Server::default();
        settings.conf_map_to_struct("goconfig", &mut server).unwrap();
        assert_eq!(server.port, 8080);
        assert_eq!(server.hosts, "127.0.0.1 127.0.0.2 127.0.0.3");
    }

    #[test]
    fn test_conf_map_to_struct_reports_unavailable() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "conf.yaml", "goconfig: [unclosed");
        let settings = settings_for(&path);

        let mut server = Server::default();
        let err = settings.conf_map_to_struct("goconfig", &mut server).unwrap_err();
        assert!(matches!(err, ConfigError::Unavailable { .. }));
    }
}
