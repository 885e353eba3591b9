//! Format-agnostic configuration access for INI and YAML files.
//!
//! This crate loads a configuration file once, caches the parsed result by
//! path, and exposes string-typed lookups (scalar, array, section map,
//! section-as-struct) through the [`Config`] trait so callers never need to
//! know which file format backs a value.

pub mod accessor;
pub mod backend;
pub mod cache;
pub mod constants;
mod contract;
mod error;
pub mod global;
pub mod loader;
pub mod paths;

pub use accessor::{InitStatus, Settings};
pub use backend::{IniConfig, YamlConfig};
pub use cache::ConfigCache;
pub use contract::Config;
pub use error::ConfigError;
pub use loader::FileFormat;
