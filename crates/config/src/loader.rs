//! File format dispatch and one-shot parsing.
//!
//! Responsibilities:
//! - Infer a file's format from its path suffix.
//! - Rewrite suffix-less paths to their `.ini` form.
//! - Read a file and hand its content to the matching backend.
//!
//! Does NOT handle:
//! - Caching parsed configs (see `cache.rs`).
//! - Content sniffing. Dispatch looks at the path only.
//!
//! Invariants:
//! - A path ending in `yaml` is YAML; a path ending in `.ini` is INI as-is;
//!   anything else is INI with `.ini` appended.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::{IniConfig, YamlConfig};
use crate::constants::{INI_SUFFIX, YAML_SUFFIX};
use crate::contract::Config;
use crate::error::ConfigError;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Ini,
    Yaml,
}

impl FileFormat {
    /// Infers the format from `path`'s suffix.
    pub fn detect(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(YAML_SUFFIX) {
            FileFormat::Yaml
        } else {
            FileFormat::Ini
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Ini => f.write_str("ini"),
            FileFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Resolves `path` to the file that will actually be loaded, and its format.
///
/// This is a naming convenience only; nothing is renamed on disk.
pub fn resolve(path: &Path) -> (PathBuf, FileFormat) {
    let format = FileFormat::detect(path);
    if format == FileFormat::Yaml || path.to_string_lossy().ends_with(INI_SUFFIX) {
        return (path.to_path_buf(), format);
    }

    let mut rewritten = path.as_os_str().to_owned();
    rewritten.push(INI_SUFFIX);
    (PathBuf::from(rewritten), FileFormat::Ini)
}

/// Reads and parses `path` with the backend for `format`.
pub fn load_file(path: &Path, format: FileFormat) -> Result<Arc<dyn Config>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::Missing {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let config: Arc<dyn Config> = match format {
        FileFormat::Ini => Arc::new(IniConfig::parse(path, &content)?),
        FileFormat::Yaml => Arc::new(YamlConfig::parse(path, &content)?),
    };
    Ok(config)
}
