//! Format-specific implementations of [`crate::Config`].
//!
//! Responsibilities:
//! - Parse one file's content into an in-memory tree.
//! - Answer the shared lookups with string coercion.
//!
//! Does NOT handle:
//! - Reading files from disk or picking a format (see `loader.rs`).
//! - Caching parsed instances (see `cache.rs`).
//!
//! Invariants:
//! - Each instance guards its tree with its own `RwLock`, so `set` never
//!   races a concurrent read.

mod ini_file;
mod yaml_file;

pub use ini_file::IniConfig;
pub use yaml_file::YamlConfig;

/// Renders a string as a YAML scalar that decodes back to the same text.
///
/// Plain form is kept when YAML would read it back as the same string, a
/// number or a bool, so typed decoding can still target numeric fields.
/// Anything else is double quoted.
pub(crate) fn yaml_scalar(value: &str) -> String {
    use serde_yaml::Value;

    let plain = match serde_yaml::from_str::<Value>(value) {
        Ok(Value::Bool(_)) | Ok(Value::Number(_)) => true,
        Ok(Value::String(parsed)) => parsed == value,
        _ => false,
    };

    if plain && !value.contains('\n') {
        value.to_string()
    } else {
        serde_json::Value::String(value.to_string()).to_string()
    }
}

/// Resolves an overlaid string to the YAML node it would be in a file.
///
/// Bools and numbers keep their native type when their canonical form is
/// exactly `value`, so typed decoding sees the same node `yaml_scalar`
/// produces for the INI backend and string lookups still return `value`.
pub(crate) fn yaml_value(value: &str) -> serde_yaml::Value {
    use serde_yaml::Value;

    match serde_yaml::from_str::<Value>(value) {
        Ok(Value::Bool(b)) if b.to_string() == value => Value::Bool(b),
        Ok(Value::Number(n)) if n.to_string() == value => Value::Number(n),
        _ => Value::String(value.to_string()),
    }
}
