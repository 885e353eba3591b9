//! confkit - read values from INI and YAML configuration files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load the selected config file once and run one lookup against it.
//! - Print the result as text or JSON on stdout.
//!
//! Does NOT handle:
//! - Parsing, caching or lookups themselves (see `crates/config`).
//! - Writing config files. Nothing here modifies the file on disk.
//!
//! Invariants:
//! - Logs and errors go to stderr; stdout carries only command output.
//! - The process exit code follows `error::ExitCode`.

mod args;
mod commands;
mod dispatch;
mod error;
mod output;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use confkit_config::Settings;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(rendered) => {
            println!("{}", rendered);
            std::process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(e.exit_code().as_i32());
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let settings = Settings::default().with_default_path(&cli.config);
    let config = settings
        .try_init()
        .context("Failed to load configuration")?;

    let output = run_command(&cli.command, config.as_ref())?;
    output.render(cli.output)
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug.
fn init_logging(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("error"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
