//! Shared test utilities for confkit integration tests.
//!
//! Invariants / Assumptions:
//! - `CONFKIT_CONFIG` and `RUST_LOG` are cleared so the host environment
//!   never leaks into a test.

use std::path::{Path, PathBuf};

use assert_cmd::Command;

pub const INI: &str = "\
; sample
app_name = confkit

[goconfig]
hosts = 127.0.0.1 127.0.0.2 127.0.0.3
port = 8080
debug = false

[goconfigStringMap]
name = goconfig
";

pub const YAML: &str = "\
goconfig:
  hosts: 127.0.0.1 127.0.0.2 127.0.0.3
  port: 8080
  debug: false
  tags: [edge, canary]
goconfigStringMap:
  name: goconfig
";

/// Returns a hermetic `confkit` command.
pub fn confkit_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confkit");
    cmd.env_remove("CONFKIT_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
