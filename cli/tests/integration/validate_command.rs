//! Integration tests for `preingest validate`.
//!
//! The result of a real run depends on the machine, so these tests pin down
//! the contract that holds everywhere: exit codes, JSON shape and config
//! file handling.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn preingest_in(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("preingest"));
    cmd.env("NO_COLOR", "1")
        .env_remove("PREINGEST_CONFIG")
        .current_dir(dir);
    cmd
}

#[test]
fn test_validate_malformed_json_config_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), "{ not json").expect("write config");
    preingest_in(dir.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse config.json"));
}

#[test]
fn test_validate_malformed_yaml_config_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("probes.yaml");
    std::fs::write(&path, "FreeDiskSpace: [unclosed").expect("write config");
    preingest_in(dir.path())
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn test_validate_config_from_env_var() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("env.json");
    std::fs::write(&path, "[1, 2]").expect("write config");
    preingest_in(dir.path())
        .env("PREINGEST_CONFIG", &path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("env.json"));
}

#[test]
fn test_validate_json_error_is_json_on_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), "{ not json").expect("write config");
    let output = preingest_in(dir.path())
        .args(["validate", "--json"])
        .output()
        .expect("run preingest");
    assert_eq!(output.status.code(), Some(1));
    let doc: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(doc["error"], true);
    assert!(
        doc["message"]
            .as_str()
            .is_some_and(|m| m.contains("cannot parse"))
    );
}

#[test]
fn test_validate_json_exit_code_matches_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = preingest_in(dir.path())
        .args(["validate", "--json"])
        .output()
        .expect("run preingest");
    let code = output.status.code().expect("exit code");
    assert!(matches!(code, 0..=2), "unexpected exit code {code}");

    let doc: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    if doc.get("error").is_some() {
        assert_eq!(code, 1);
        return;
    }
    let expected = match doc["final_result"].as_str() {
        Some("Pass") => 0,
        Some("Error") => 1,
        _ => 2,
    };
    assert_eq!(code, expected);
    assert!(doc["outcomes"].is_array());
    assert!(doc["pass_count"].is_u64());
    assert!(doc["total_count"].is_u64());
}
