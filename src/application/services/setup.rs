//! Application service — git identity for the setup flow.

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Global git identity as currently configured, `None` for unset fields.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GitIdentity {
    /// Both fields present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some()
    }
}

/// Read `user.name` / `user.email` from the global git config.
///
/// A missing key (git exits 1) or a missing git binary both map to
/// `None` — setup then prompts for the value.
pub async fn current_git_identity(runner: &impl CommandRunner) -> GitIdentity {
    GitIdentity {
        name: read_git_config(runner, "user.name").await,
        email: read_git_config(runner, "user.email").await,
    }
}

/// Write one `user.*` key to the global git config.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or exits non-zero.
pub async fn set_git_config(runner: &impl CommandRunner, key: &str, value: &str) -> Result<()> {
    let output = runner
        .run("git", &["config", "--global", key, value])
        .await
        .with_context(|| format!("setting {key}"))?;
    anyhow::ensure!(
        output.status.success(),
        "git config --global {key} failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}

async fn read_git_config(runner: &impl CommandRunner, key: &str) -> Option<String> {
    let output = runner.run("git", &["config", "--global", "--get", key]).await.ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
