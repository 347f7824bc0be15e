//! Integration tests for `rigup registry`.
//!
//! All filesystem-touching tests point `RIGUP_KEY_DIR` / `RIGUP_SSH_CONFIG`
//! at a temp directory so they never read or write `~/.ssh`, and they clear
//! `SSH_AUTH_SOCK` so agent behavior is deterministic (load attempts degrade
//! to warnings).

#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rigup() -> Command {
    let mut cmd = Command::cargo_bin("rigup").expect("rigup binary should exist");
    cmd.env_remove("SSH_AUTH_SOCK");
    cmd
}

/// A temp dir with a pre-created keypair, plus the env paths pointing into it.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn key_dir(&self) -> String {
        self.dir.path().join("ssh").to_string_lossy().into_owned()
    }

    fn config_path(&self) -> String {
        self.dir.path().join("ssh").join("config").to_string_lossy().into_owned()
    }

    /// Write a keypair so upsert never needs a real ssh-keygen.
    fn seed_key(&self, name: &str) -> String {
        let ssh = self.dir.path().join("ssh");
        std::fs::create_dir_all(&ssh).expect("mkdir");
        let key = ssh.join(name);
        std::fs::write(&key, "PRIVATE KEY").expect("key");
        std::fs::write(ssh.join(format!("{name}.pub")), format!("ssh-ed25519 AAAATEST {name}"))
            .expect("pub");
        key.to_string_lossy().into_owned()
    }

    fn config_text(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("ssh").join("config")).expect("config")
    }

    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = rigup();
        cmd.env("RIGUP_KEY_DIR", self.key_dir())
            .env("RIGUP_SSH_CONFIG", self.config_path())
            .args(args);
        cmd
    }
}

// ---------------------------------------------------------------------------
// Subcommand registration
// ---------------------------------------------------------------------------

#[test]
fn test_registry_help_shows_upsert_repair_and_show() {
    rigup()
        .args(["registry", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upsert"))
        .stdout(predicate::str::contains("repair"))
        .stdout(predicate::str::contains("show"));
}

// ---------------------------------------------------------------------------
// registry upsert
// ---------------------------------------------------------------------------

#[test]
fn test_upsert_writes_stanza_and_prints_public_key() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    sb.cmd(&["registry", "upsert", "wk", "github.com", "git", &key])
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh-ed25519 AAAATEST id_wk"));

    let text = sb.config_text();
    assert!(text.contains("Host wk\n"));
    assert!(text.contains("    HostName github.com\n"));
    assert!(text.contains("    User git\n"));
    assert!(text.contains(&format!("    IdentityFile {key}\n")));
}

#[test]
fn test_upsert_twice_leaves_exactly_one_stanza() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    for _ in 0..2 {
        sb.cmd(&["registry", "upsert", "wk", "github.com", "git", &key])
            .assert()
            .success();
    }
    assert_eq!(sb.config_text().matches("Host wk").count(), 1);
}

#[test]
fn test_upsert_replaces_existing_alias_entirely() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    sb.cmd(&["registry", "upsert", "alias1", "host1.example", "git", &key])
        .assert()
        .success();
    sb.cmd(&["registry", "upsert", "alias1", "host2.example", "git", &key])
        .assert()
        .success();

    let text = sb.config_text();
    assert_eq!(text.matches("Host alias1").count(), 1);
    assert!(text.contains("HostName host2.example"));
    assert!(!text.contains("host1.example"));
}

#[test]
fn test_upsert_empty_alias_fails_with_clear_message() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    sb.cmd(&["registry", "upsert", "", "github.com", "git", &key])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alias must not be empty"));
}

#[test]
fn test_upsert_missing_args_fails_in_non_interactive_mode() {
    let sb = Sandbox::new();
    sb.cmd(&["--yes", "registry", "upsert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing value for <alias>"));
}

#[test]
fn test_upsert_missing_agent_is_a_warning_not_a_failure() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    // SSH_AUTH_SOCK is cleared, so any agent-load attempt fails; the
    // command must still exit 0.
    sb.cmd(&["registry", "upsert", "wk", "github.com", "git", &key])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// registry repair
// ---------------------------------------------------------------------------

#[test]
fn test_repair_verifies_existing_identities() {
    let sb = Sandbox::new();
    let a = sb.seed_key("id_a");
    let b = sb.seed_key("id_b");
    std::fs::write(
        sb.config_path(),
        format!("Host a\n    IdentityFile {a}\nHost b\n    IdentityFile {b}\n"),
    )
    .expect("write config");

    sb.cmd(&["registry", "repair"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 identities verified"));
}

#[test]
fn test_repair_with_no_config_file_succeeds() {
    let sb = Sandbox::new();
    sb.cmd(&["registry", "repair"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 identities verified"));
}

// ---------------------------------------------------------------------------
// registry show
// ---------------------------------------------------------------------------

#[test]
fn test_show_lists_registered_aliases() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    sb.cmd(&["registry", "upsert", "wk", "github.com", "git", &key])
        .assert()
        .success();
    sb.cmd(&["registry", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wk"))
        .stdout(predicate::str::contains("git@github.com"));
}

#[test]
fn test_show_json_is_parseable_and_round_trips_fields() {
    let sb = Sandbox::new();
    let key = sb.seed_key("id_wk");

    sb.cmd(&["registry", "upsert", "wk", "github.com", "git", &key])
        .assert()
        .success();

    let output = sb.cmd(&["--json", "registry", "show"]).output().expect("run");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(parsed[0]["alias"], "wk");
    assert_eq!(parsed[0]["hostname"], "github.com");
    assert_eq!(parsed[0]["user"], "git");
}

#[test]
fn test_show_empty_registry_mentions_config_path() {
    let sb = Sandbox::new();
    sb.cmd(&["registry", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no hosts registered"));
}
