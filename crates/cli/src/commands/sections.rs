//! Sections command implementation: list section names in document order.

use anyhow::Result;
use confkit_config::Config;

use crate::output::Output;

/// Run the sections command.
pub fn run(config: &dyn Config) -> Result<Output> {
    Ok(Output::List(config.section_list()))
}
