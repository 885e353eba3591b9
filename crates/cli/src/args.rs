//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the config file from `--config` or `CONFKIT_CONFIG`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load the config file (see `main`).

use clap::{Parser, Subcommand, ValueEnum};
use confkit_config::constants::{DEFAULT_ARRAY_DELIMITER, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "confkit")]
#[command(about = "Read values from INI and YAML configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confkit get goconfig hosts\n  confkit --config conf/app.yaml section goconfig --output json\n  confkit array goconfig hosts --delimiter ,\n  confkit sections\n"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Paths ending in `yaml` are read as YAML; anything else is read as INI,
    /// with `.ini` appended when missing.
    #[arg(
        short,
        long,
        global = true,
        env = "CONFKIT_CONFIG",
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines, one value per line
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value stored under SECTION/KEY
    Get {
        /// Section name ("" or DEFAULT for the INI general section)
        section: String,

        /// Key name
        key: String,

        /// Value to print when the key is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print the value under SECTION/KEY split into parts
    Array {
        /// Section name
        section: String,

        /// Key name
        key: String,

        /// Delimiter to split on
        #[arg(short, long, default_value = DEFAULT_ARRAY_DELIMITER)]
        delimiter: String,
    },

    /// Print every key/value pair of SECTION
    Section {
        /// Section name
        section: String,

        /// Split every value on the default delimiter
        #[arg(long)]
        arrays: bool,
    },

    /// List section names
    Sections,

    /// List key names in SECTION
    Keys {
        /// Section name
        section: String,
    },
}
