//! Application service — the host credential registry.
//!
//! Maintains the alias → connection mapping in the SSH client config and
//! guarantees every referenced identity file exists, is offered to the
//! agent session, and has its public half surfaced for registration with
//! a remote git provider.
//!
//! All paths (config file, default key directory, home directory) are
//! explicit construction parameters — nothing is read from ambient state.
//! Process execution goes through the [`CommandRunner`] port; the config
//! and key files themselves are plain local filesystem effects.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::config_doc::{ConfigDocument, HostEntry};
use crate::domain::error::RegistryError;

/// Clipboard tools tried in order when copying a public key.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip.exe", &[]),
];

/// One alias as read back from the config document, for `registry show`.
#[derive(Debug, serde::Serialize)]
pub struct RegisteredHost {
    /// Host alias (the stanza pattern).
    pub alias: String,
    /// `HostName` value, if the stanza has one.
    pub hostname: Option<String>,
    /// `User` value, if the stanza has one.
    pub user: Option<String>,
    /// `IdentityFile` value, if the stanza has one.
    pub identity_file: Option<String>,
}

/// Outcome of a [`CredentialRegistry::repair`] sweep.
#[derive(Debug, Default)]
pub struct RepairReport {
    /// Identity declarations found in the config document.
    pub checked: usize,
    /// Entries that could not be repaired (warned, not fatal).
    pub failed: usize,
}

/// The host credential registry over one SSH config file.
pub struct CredentialRegistry {
    config_path: PathBuf,
    key_dir: PathBuf,
    home_dir: PathBuf,
}

impl CredentialRegistry {
    /// Creates a registry with explicit paths (tests inject temp dirs).
    #[must_use]
    pub fn new(config_path: PathBuf, key_dir: PathBuf, home_dir: PathBuf) -> Self {
        Self {
            config_path,
            key_dir,
            home_dir,
        }
    }

    /// Path of the config file this registry edits.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Resolve a raw identityfile argument: absolute paths pass through,
    /// `~/` expands against the home directory, and a bare filename lands
    /// under the default key directory.
    #[must_use]
    pub fn resolve_identity(&self, raw: &str) -> PathBuf {
        if let Some(rest) = raw.strip_prefix("~/") {
            return self.home_dir.join(rest);
        }
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            path
        } else {
            self.key_dir.join(raw)
        }
    }

    /// Replace-or-append the stanza for `alias`, then ensure its key.
    ///
    /// Not atomic across its two effects: the stanza is written first, and
    /// a key-generation failure does not roll it back.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty alias, an unwritable config file, or a
    /// failed key generation. Agent-load and clipboard failures are
    /// warnings, not errors.
    pub async fn upsert(
        &self,
        alias: &str,
        hostname: &str,
        user: &str,
        identityfile: &str,
        runner: &impl CommandRunner,
        reporter: &impl ProgressReporter,
    ) -> Result<()> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(RegistryError::EmptyAlias.into());
        }
        let identity_path = self.resolve_identity(identityfile.trim());

        let mut doc = self.load_document()?;
        doc.upsert(&HostEntry {
            alias: alias.to_string(),
            hostname: hostname.trim().to_string(),
            user: user.trim().to_string(),
            identity_path: identity_path.clone(),
        });
        self.save_document(&doc)?;
        reporter.success(&format!(
            "registered {alias} -> {}@{}",
            user.trim(),
            hostname.trim()
        ));

        self.ensure_key(&identity_path, runner, reporter).await
    }

    /// Generate-if-absent, agent-load, and surface the public key.
    ///
    /// Idempotent: an existing key is never regenerated. Agent-load and
    /// clipboard failures are warnings; the operation still succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if key generation fails (disk full, permission
    /// denied, `ssh-keygen` missing).
    pub async fn ensure_key(
        &self,
        identity: &Path,
        runner: &impl CommandRunner,
        reporter: &impl ProgressReporter,
    ) -> Result<()> {
        let path = identity.to_string_lossy().into_owned();

        if identity.exists() {
            reporter.step(&format!("key {path} already exists"));
        } else {
            if let Some(parent) = identity.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
                set_permissions(parent, 0o700)?;
            }
            // No passphrase, so ssh-keygen can never hang on a prompt.
            let comment = format!("rigup-{}", chrono::Utc::now().format("%Y-%m-%d"));
            let args = ["-q", "-t", "ed25519", "-N", "", "-C", &comment, "-f", &path];
            let generated = match runner.run("ssh-keygen", &args).await {
                Ok(output) if output.status.success() => Ok(()),
                Ok(output) => Err(RegistryError::KeygenFailed {
                    path: path.clone(),
                    detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                }),
                Err(e) => Err(RegistryError::KeygenFailed {
                    path: path.clone(),
                    detail: e.to_string(),
                }),
            };
            generated?;
            reporter.success(&format!("generated ed25519 key {path}"));
        }

        // Agent load is best-effort: a duplicate add or an unreachable
        // agent is a normal, recoverable condition.
        match runner.run("ssh-add", &[&path]).await {
            Ok(output) if output.status.success() => {
                reporter.success(&format!("loaded {path} into the agent"));
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                reporter.warn(&format!("could not load {path} into the agent: {}", stderr.trim()));
            }
            Err(e) => {
                reporter.warn(&format!("could not load {path} into the agent: {e}"));
            }
        }

        surface_public_key(identity, runner, reporter).await;
        Ok(())
    }

    /// Re-materialize every identity the config document references.
    ///
    /// Best-effort sweep: a failing entry is warned about and the sweep
    /// continues to the next one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the config file itself cannot be read.
    pub async fn repair(
        &self,
        runner: &impl CommandRunner,
        reporter: &impl ProgressReporter,
    ) -> Result<RepairReport> {
        let doc = self.load_document()?;
        let mut report = RepairReport::default();
        for raw in doc.identity_files() {
            report.checked += 1;
            let path = self.resolve_identity(&raw);
            reporter.step(&format!("checking identity {}", path.display()));
            if let Err(e) = self.ensure_key(&path, runner, reporter).await {
                reporter.warn(&format!("{raw}: {e:#}"));
                report.failed += 1;
            }
        }
        Ok(report)
    }

    /// Read back every stanza for `registry show`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read.
    pub fn entries(&self) -> Result<Vec<RegisteredHost>> {
        let doc = self.load_document()?;
        Ok(doc
            .stanzas()
            .iter()
            .map(|s| RegisteredHost {
                alias: s.alias.clone(),
                hostname: s.option("HostName").map(str::to_string),
                user: s.option("User").map(str::to_string),
                identity_file: s.option("IdentityFile").map(str::to_string),
            })
            .collect())
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn load_document(&self) -> Result<ConfigDocument> {
        if !self.config_path.exists() {
            return Ok(ConfigDocument::default());
        }
        let text = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("read {}", self.config_path.display()))?;
        Ok(ConfigDocument::parse(&text))
    }

    fn save_document(&self, doc: &ConfigDocument) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
            set_permissions(parent, 0o700)?;
        }
        std::fs::write(&self.config_path, doc.render())
            .with_context(|| format!("write {}", self.config_path.display()))?;
        set_permissions(&self.config_path, 0o600)
    }

}

/// Print the public half and best-effort copy it to the clipboard.
async fn surface_public_key(
    identity: &Path,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
) {
    let pub_path = PathBuf::from(format!("{}.pub", identity.display()));
    let key = match std::fs::read_to_string(&pub_path) {
        Ok(key) => key.trim().to_string(),
        Err(e) => {
            reporter.warn(&format!("cannot read {}: {e}", pub_path.display()));
            return;
        }
    };
    reporter.display(&format!(
        "Public key for {} (add it to your git provider):\n{key}",
        identity.display()
    ));
    for &(tool, args) in CLIPBOARD_TOOLS {
        match runner.run_with_stdin(tool, args, key.as_bytes()).await {
            Ok(output) if output.status.success() => {
                reporter.success(&format!("public key copied to clipboard via {tool}"));
                return;
            }
            _ => {}
        }
    }
    reporter.warn("no clipboard tool available; copy the key above manually");
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
