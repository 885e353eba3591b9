//! Get command implementation.
//!
//! Responsibilities:
//! - Look up a single value by section and key.
//! - Fall back to `--default` when the key is absent.
//!
//! Does NOT handle:
//! - Splitting values (see `array`).

use anyhow::Result;
use confkit_config::Config;
use tracing::debug;

use crate::commands::has_key;
use crate::error::CliError;
use crate::output::Output;

/// Run the get command.
pub fn run(config: &dyn Config, section: &str, key: &str, default: Option<&str>) -> Result<Output> {
    debug!(section, key, "Looking up value");

    if has_key(config, section, key) {
        return Ok(Output::Value(config.must_value(section, key, "")));
    }

    match default {
        Some(default) => Ok(Output::Value(default.to_string())),
        None => Err(CliError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
        .into()),
    }
}
