//! CLI command implementations.
//!
//! Each command reads from an already-loaded [`Config`] and returns an
//! [`Output`](crate::output::Output); rendering and printing happen in `main`.

pub mod array;
pub mod get;
pub mod keys;
pub mod section;
pub mod sections;

use confkit_config::Config;

/// Returns true if `section` holds `key`.
fn has_key(config: &dyn Config, section: &str, key: &str) -> bool {
    config.key_list(section).iter().any(|k| k == key)
}
