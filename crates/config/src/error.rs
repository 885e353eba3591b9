//! Error types for configuration loading and typed decoding.
//!
//! Responsibilities:
//! - Define error variants for every failure a direct [`crate::Config`] user can see.
//! - Carry the offending path or section in each variant for debugging.
//!
//! Does NOT handle:
//! - Absent sections or keys. Those are fallbacks, not errors (see `contract.rs`).
//! - Degrading errors into zero values (see `accessor.rs`).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or decoding configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {path}")]
    Missing { path: PathBuf },

    #[error("Failed to read config file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse INI config file at {path}")]
    IniParse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("Failed to parse YAML config file at {path}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to encode section '{section}' for decoding")]
    Encode {
        section: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to decode section '{section}' into the requested type")]
    Decode {
        section: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config from {path} is unavailable")]
    Unavailable { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns true if the error means the file does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Missing { .. })
    }
}
