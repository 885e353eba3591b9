//! CLI errors and exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `CliError` and `ConfigError` values to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - A config file that cannot be opened or parsed always exits with 5.
//! - An absent section or key without a fallback always exits with 4.

use confkit_config::ConfigError;

/// Lookup failures detected by the CLI itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("section '{section}' not found")]
    SectionNotFound { section: String },

    #[error("key '{key}' not found in section '{section}'")]
    KeyNotFound { section: String, key: String },
}

/// Structured exit codes for confkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Section or key not found and no default was given.
    NotFound = 4,

    /// The configuration file is missing or could not be parsed.
    ///
    /// Scripts should check `--config` / `CONFKIT_CONFIG`.
    ConfigUnavailable = 5,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&CliError> for ExitCode {
    fn from(_: &CliError) -> Self {
        ExitCode::NotFound
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Missing { .. }
            | ConfigError::Read { .. }
            | ConfigError::IniParse { .. }
            | ConfigError::YamlParse { .. }
            | ConfigError::Unavailable { .. } => ExitCode::ConfigUnavailable,
            ConfigError::Encode { .. } | ConfigError::Decode { .. } | ConfigError::Io(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(err);
            }
        }
        ExitCode::GeneralError
    }
}
