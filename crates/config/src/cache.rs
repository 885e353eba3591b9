//! Process-wide cache of parsed configuration files.
//!
//! Responsibilities:
//! - Map a resolved file path to the single parsed [`Config`] for it.
//! - Guarantee each path is parsed at most once until the cache is cleared.
//!
//! Does NOT handle:
//! - Choosing which file is "the" config (see `accessor.rs`).
//! - Watching files for changes. Entries are only dropped by `clear`.
//!
//! Invariants:
//! - At most one instance per distinct resolved path.
//! - A failed parse is never cached, so the next call retries.
//! - Misses re-check under the write lock before parsing, so racing callers
//!   for the same path share one parse.
//! - `generation` increases on every `clear`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::contract::Config;
use crate::error::ConfigError;
use crate::loader::{self, FileFormat};

/// A read/write-locked map from resolved path to parsed config.
///
/// Construct one per process (or per test) and share it by reference or
/// `Arc`; see `global.rs` for the process default.
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: RwLock<HashMap<PathBuf, Arc<dyn Config>>>,
    loads: AtomicUsize,
    generation: AtomicU64,
}

impl ConfigCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached config for an already-resolved `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Arc<dyn Config>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Returns true if a config for the resolved `path` is cached.
    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Returns the config for `path`, parsing it on first use.
    ///
    /// The format is inferred from the suffix and the cache key is the
    /// resolved path (see [`loader::resolve`]).
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<dyn Config>, ConfigError> {
        let (resolved, format) = loader::resolve(path.as_ref());
        self.get_or_load_as(resolved, format)
    }

    /// Returns the config for `path` parsed as `format`, bypassing suffix inference.
    ///
    /// The path is used verbatim as the cache key. If the path is already
    /// cached the existing instance is returned whatever its format.
    pub fn get_or_load_as(
        &self,
        path: impl Into<PathBuf>,
        format: FileFormat,
    ) -> Result<Arc<dyn Config>, ConfigError> {
        let path = path.into();
        if let Some(config) = self.get(&path) {
            tracing::debug!(path = %path.display(), "Config cache hit");
            return Ok(config);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = entries.get(&path) {
            return Ok(Arc::clone(config));
        }

        let config = loader::load_file(&path, format).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
        })?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            path = %path.display(),
            format = %format,
            sections = config.section_list().len(),
            "Config loaded"
        );

        entries.insert(path, Arc::clone(&config));
        Ok(config)
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
        self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("Config cache cleared");
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful parses performed by this cache.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Current clear generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
