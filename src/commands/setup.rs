//! `rigup setup` — ordered idempotent provisioning steps.
//!
//! Mirrors the phase scripts this tool replaces: each step is run in a
//! fixed order, its outcome is appended to a timestamped run log, and a
//! non-fatal step failure is logged and skipped rather than aborting the
//! sequence.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::PlatformProbe;
use crate::application::services::setup::{current_git_identity, set_git_config};
use crate::commands::registry::open_registry;
use crate::domain::platform;
use crate::infra::{ProcPlatformProbe, RunLog};
use crate::output::ConsoleReporter;

/// Filename of the default workstation key under the key directory.
const DEFAULT_KEY: &str = "id_ed25519";

/// Run the setup command.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut log = RunLog::create_in(&RunLog::default_dir()?)?;
    app.output.header("Setting up workstation");
    app.output.kv("log", &log.path().display().to_string());

    detect_platform(app, &mut log);
    configure_git_identity(app, &mut log).await;
    ensure_default_key(app, &mut log).await?;

    app.output.success("setup complete");
    log.record("setup complete");
    Ok(())
}

fn detect_platform(app: &AppContext, log: &mut RunLog) {
    let probe = ProcPlatformProbe;
    let platform = platform::classify(
        &probe.kernel_version().unwrap_or_default(),
        probe.device_model().as_deref(),
    );
    app.output.kv("platform", &platform.to_string());
    log.record(&format!("platform: {platform}"));
}

/// Prompt for and persist any missing `user.name` / `user.email`.
/// Skipped (with a warning) in non-interactive mode.
async fn configure_git_identity(app: &AppContext, log: &mut RunLog) {
    let identity = current_git_identity(&app.runner).await;
    if identity.is_complete() {
        app.output.success("git identity already configured");
        log.record("git identity: already configured");
        return;
    }

    for (key, current) in [("user.name", identity.name), ("user.email", identity.email)] {
        if current.is_some() {
            continue;
        }
        let value = match app.require(&format!("git {key}"), None) {
            Ok(v) => v,
            Err(e) => {
                app.output.warn(&format!("skipping git {key}: {e}"));
                log.record(&format!("git {key}: skipped ({e})"));
                continue;
            }
        };
        match set_git_config(&app.runner, key, &value).await {
            Ok(()) => {
                app.output.success(&format!("set git {key}"));
                log.record(&format!("git {key}: set"));
            }
            Err(e) => {
                app.output.warn(&format!("could not set git {key}: {e:#}"));
                log.record(&format!("git {key}: failed ({e:#})"));
            }
        }
    }
}

/// Ensure the default workstation key exists and is agent-loaded.
/// A key-generation failure is fatal, as everywhere else.
async fn ensure_default_key(app: &AppContext, log: &mut RunLog) -> Result<()> {
    let registry = open_registry()?;
    let key_path = registry.resolve_identity(DEFAULT_KEY);
    let reporter = ConsoleReporter::new(&app.output);
    match registry.ensure_key(&key_path, &app.runner, &reporter).await {
        Ok(()) => {
            log.record(&format!("default key: {} ready", key_path.display()));
            Ok(())
        }
        Err(e) => {
            log.record(&format!("default key: failed ({e:#})"));
            Err(e)
        }
    }
}
