//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Loading the config file (see `main`).
//!
//! Invariants:
//! - Every handler reads from the one config loaded by `main`.

use anyhow::Result;
use confkit_config::Config;

use crate::args::Commands;
use crate::commands;
use crate::output::Output;

/// Dispatch a parsed subcommand to its handler.
pub(crate) fn run_command(command: &Commands, config: &dyn Config) -> Result<Output> {
    match command {
        Commands::Get {
            section,
            key,
            default,
        } => commands::get::run(config, section, key, default.as_deref()),
        Commands::Array {
            section,
            key,
            delimiter,
        } => commands::array::run(config, section, key, delimiter),
        Commands::Section { section, arrays } => commands::section::run(config, section, *arrays),
        Commands::Sections => commands::sections::run(config),
        Commands::Keys { section } => commands::keys::run(config, section),
    }
}
