//! Section command implementation.
//!
//! Responsibilities:
//! - Print every key/value pair of one section, sorted by key.
//! - Optionally split each value on the default delimiter.
//!
//! Invariants:
//! - An absent section is an error, an empty one is not.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use confkit_config::Config;
use confkit_config::constants::DEFAULT_ARRAY_DELIMITER;

use crate::error::CliError;
use crate::output::Output;

/// Run the section command.
pub fn run(config: &dyn Config, section: &str, arrays: bool) -> Result<Output> {
    let map = config
        .section(section)
        .with_context(|| format!("Failed to read section '{section}'"))?
        .ok_or_else(|| CliError::SectionNotFound {
            section: section.to_string(),
        })?;

    if !arrays {
        return Ok(Output::Map(map.into_iter().collect()));
    }

    let split: BTreeMap<String, Vec<String>> = map
        .into_keys()
        .map(|key| {
            let parts = config.must_value_array(section, &key, DEFAULT_ARRAY_DELIMITER);
            (key, parts)
        })
        .collect();
    Ok(Output::ArrayMap(split))
}
