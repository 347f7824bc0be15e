//! Integration tests for top-level CLI behavior: help, version, doctor.

#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn rigup() -> Command {
    Command::cargo_bin("rigup").expect("rigup binary should exist")
}

// ---------------------------------------------------------------------------
// help / version
// ---------------------------------------------------------------------------

#[test]
fn test_no_args_shows_help() {
    rigup()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_all_subcommands() {
    rigup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("registry"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_prints_binary_name_and_version() {
    rigup()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("rigup {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_json_output() {
    rigup()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"version":"#));
}

#[test]
fn test_unknown_subcommand_fails() {
    rigup().arg("frobnicate").assert().failure();
}

// ---------------------------------------------------------------------------
// doctor
// ---------------------------------------------------------------------------

#[test]
fn test_doctor_always_succeeds() {
    // Findings are reported, never treated as failures.
    rigup()
        .env_remove("SSH_AUTH_SOCK")
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn test_doctor_json_reports_platform_and_tools() {
    let output = rigup()
        .env_remove("SSH_AUTH_SOCK")
        .args(["--json", "doctor"])
        .output()
        .expect("run doctor");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(parsed["platform"].is_string());
    assert!(parsed["tools"].is_array());
    assert_eq!(parsed["agent_socket"], false);
}

#[test]
fn test_doctor_quiet_suppresses_progress_output() {
    let output = rigup()
        .env_remove("SSH_AUTH_SOCK")
        .args(["--quiet", "doctor"])
        .output()
        .expect("run doctor");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("detecting platform"));
}
