//! Helpers for locating config files relative to the running program.
//!
//! Responsibilities:
//! - Find the directory of the running executable.
//! - Fall back to this crate's source directory when the executable was
//!   built into a temp directory (`cargo run` scratch builds, test binaries
//!   under `TEMP`/`TMPDIR`).
//!
//! Does NOT handle:
//! - Choosing a config file name (see `constants.rs`).

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the canonical directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or(Path::new("."));
    Ok(dir.canonicalize()?)
}

/// Returns the temp directory named by `TEMP` or `TMPDIR`, if any.
fn temp_dir_from_env() -> Option<PathBuf> {
    ["TEMP", "TMPDIR"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .map(|dir| dir.canonicalize().unwrap_or(dir))
}

fn is_under(dir: &Path, temp: Option<&Path>) -> bool {
    temp.is_some_and(|temp| dir.starts_with(temp))
}

/// Returns the directory config paths should be built from.
///
/// This is the executable's directory, unless it lies under the temp
/// directory, in which case it is this crate's manifest directory.
pub fn abs_dir() -> PathBuf {
    match executable_dir() {
        Ok(dir) if !is_under(&dir, temp_dir_from_env().as_deref()) => dir,
        Ok(_) => PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot locate executable, using source directory");
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        }
    }
}
