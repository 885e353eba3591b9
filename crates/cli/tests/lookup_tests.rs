//! Integration tests for the lookup subcommands against INI and YAML files.

mod common;

use common::{INI, YAML, confkit_cmd, write_config};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_get_from_ini() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.ini", INI);

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["get", "goconfig", "hosts"])
        .assert()
        .success()
        .stdout("127.0.0.1 127.0.0.2 127.0.0.3\n");
}

#[test]
fn test_get_general_section() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.ini", INI);

    for section in ["", "DEFAULT"] {
        confkit_cmd()
            .arg("--config")
            .arg(&path)
            .args(["get", section, "app_name"])
            .assert()
            .success()
            .stdout("confkit\n");
    }
}

#[test]
fn test_config_path_without_suffix_resolves_to_ini() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "conf.ini", INI);

    confkit_cmd()
        .arg("--config")
        .arg(dir.path().join("conf"))
        .args(["get", "goconfig", "port"])
        .assert()
        .success()
        .stdout("8080\n");
}

#[test]
fn test_config_from_env() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.yaml", YAML);

    confkit_cmd()
        .env("CONFKIT_CONFIG", &path)
        .args(["get", "goconfigStringMap", "name"])
        .assert()
        .success()
        .stdout("goconfig\n");
}

#[test]
fn test_get_default_for_absent_key() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.yaml", YAML);

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["get", "goconfig", "absent", "--default", "fallback"])
        .assert()
        .success()
        .stdout("fallback\n");
}

#[test]
fn test_array_text_and_json() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.ini", INI);

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["array", "goconfig", "hosts"])
        .assert()
        .success()
        .stdout("127.0.0.1\n127.0.0.2\n127.0.0.3\n");

    let output = confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["--output", "json", "array", "goconfig", "hosts"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!(["127.0.0.1", "127.0.0.2", "127.0.0.3"])
    );
}

#[test]
fn test_section_json_is_string_map() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.yaml", YAML);

    let output = confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["section", "goconfig", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["port"], "8080");
    assert_eq!(parsed["debug"], "false");
    // Sequences are not strings and read back empty.
    assert_eq!(parsed["tags"], "");
}

#[test]
fn test_section_arrays() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.ini", INI);

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["section", "goconfig", "--arrays"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "hosts\t127.0.0.1\t127.0.0.2\t127.0.0.3",
        ));
}

#[test]
fn test_sections_and_keys_keep_document_order() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "conf.yaml", YAML);

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .arg("sections")
        .assert()
        .success()
        .stdout("goconfig\ngoconfigStringMap\n");

    confkit_cmd()
        .arg("--config")
        .arg(&path)
        .args(["keys", "goconfig"])
        .assert()
        .success()
        .stdout("hosts\nport\ndebug\ntags\n");
}
