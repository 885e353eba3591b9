//! Array command implementation: split one value on a delimiter.

use anyhow::Result;
use confkit_config::Config;

use crate::commands::has_key;
use crate::error::CliError;
use crate::output::Output;

/// Run the array command.
pub fn run(config: &dyn Config, section: &str, key: &str, delimiter: &str) -> Result<Output> {
    if !has_key(config, section, key) {
        return Err(CliError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
        .into());
    }
    Ok(Output::List(config.must_value_array(section, key, delimiter)))
}
