//! Integration tests for `rigup setup`.
//!
//! The sandbox overrides `HOME`, `RIGUP_KEY_DIR`, `RIGUP_SSH_CONFIG`, and
//! `RIGUP_LOG_DIR` so nothing touches the real user environment, seeds the
//! default keypair so no real `ssh-keygen` is needed, and runs with `--yes`
//! so prompts are skipped.

#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sandboxed_setup(dir: &TempDir) -> Command {
    let ssh = dir.path().join("ssh");
    std::fs::create_dir_all(&ssh).expect("mkdir");
    std::fs::write(ssh.join("id_ed25519"), "PRIVATE KEY").expect("key");
    std::fs::write(ssh.join("id_ed25519.pub"), "ssh-ed25519 AAAADEFAULT default").expect("pub");

    let mut cmd = Command::cargo_bin("rigup").expect("rigup binary should exist");
    cmd.env_remove("SSH_AUTH_SOCK")
        .env("HOME", dir.path())
        .env("RIGUP_KEY_DIR", &ssh)
        .env("RIGUP_SSH_CONFIG", ssh.join("config"))
        .env("RIGUP_LOG_DIR", dir.path().join("logs"))
        .args(["--yes", "setup"]);
    cmd
}

#[test]
fn test_setup_completes_and_reports_platform() {
    let dir = TempDir::new().expect("temp dir");
    sandboxed_setup(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("setup complete"));
}

#[test]
fn test_setup_writes_a_timestamped_run_log() {
    let dir = TempDir::new().expect("temp dir");
    sandboxed_setup(&dir).assert().success();

    let logs: Vec<_> = std::fs::read_dir(dir.path().join("logs"))
        .expect("log dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("rigup-"));
    assert!(logs[0].ends_with(".log"));

    let content =
        std::fs::read_to_string(dir.path().join("logs").join(&logs[0])).expect("log content");
    assert!(content.contains("platform:"));
    assert!(content.contains("setup complete"));
}

#[test]
fn test_setup_does_not_regenerate_the_seeded_default_key() {
    let dir = TempDir::new().expect("temp dir");
    sandboxed_setup(&dir).assert().success();

    let key = dir.path().join("ssh").join("id_ed25519");
    assert_eq!(std::fs::read_to_string(key).expect("key"), "PRIVATE KEY");
}
