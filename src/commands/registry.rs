//! `rigup registry` — manage host aliases and their credentials.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::registry::CredentialRegistry;
use crate::output::ConsoleReporter;

/// Registry subcommands.
#[derive(Subcommand)]
pub enum RegistryCommand {
    /// Register or replace a host alias and ensure its key
    Upsert {
        /// Host alias (e.g. `wk`)
        alias: Option<String>,
        /// Real hostname (e.g. `github.com`)
        hostname: Option<String>,
        /// Login user (e.g. `git`)
        user: Option<String>,
        /// Identity file: bare name under the key directory, or a full path
        identityfile: Option<String>,
    },
    /// Re-materialize every identity the config file references
    Repair,
    /// List registered host aliases
    Show,
}

/// Run the registry command.
pub async fn run(app: &AppContext, cmd: RegistryCommand) -> Result<()> {
    let registry = open_registry()?;
    match cmd {
        RegistryCommand::Upsert {
            alias,
            hostname,
            user,
            identityfile,
        } => upsert(app, &registry, alias, hostname, user, identityfile).await,
        RegistryCommand::Repair => repair(app, &registry).await,
        RegistryCommand::Show => show(app, &registry),
    }
}

/// Build the registry from the environment: `RIGUP_KEY_DIR` overrides
/// `~/.ssh`, `RIGUP_SSH_CONFIG` overrides `<key dir>/config`.
pub fn open_registry() -> Result<CredentialRegistry> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    let key_dir = std::env::var("RIGUP_KEY_DIR").map_or_else(|_| home.join(".ssh"), Into::into);
    let config_path = std::env::var("RIGUP_SSH_CONFIG")
        .map_or_else(|_| key_dir.join("config"), Into::into);
    Ok(CredentialRegistry::new(config_path, key_dir, home))
}

async fn upsert(
    app: &AppContext,
    registry: &CredentialRegistry,
    alias: Option<String>,
    hostname: Option<String>,
    user: Option<String>,
    identityfile: Option<String>,
) -> Result<()> {
    let alias = app.require("alias", alias)?;
    let hostname = app.require("hostname", hostname)?;
    let user = app.require("user", user)?;
    let identityfile = app.require("identityfile", identityfile)?;

    let reporter = ConsoleReporter::new(&app.output);
    registry
        .upsert(&alias, &hostname, &user, &identityfile, &app.runner, &reporter)
        .await
}

async fn repair(app: &AppContext, registry: &CredentialRegistry) -> Result<()> {
    let reporter = ConsoleReporter::new(&app.output);
    let report = registry.repair(&app.runner, &reporter).await?;
    if report.failed > 0 {
        app.output.warn(&format!(
            "{} of {} identities could not be repaired",
            report.failed, report.checked
        ));
    } else {
        app.output.success(&format!("{} identities verified", report.checked));
    }
    Ok(())
}

fn show(app: &AppContext, registry: &CredentialRegistry) -> Result<()> {
    let entries = registry.entries()?;
    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        app.output.info(&format!(
            "no hosts registered in {}",
            registry.config_path().display()
        ));
        return Ok(());
    }
    app.output.header("Registered hosts");
    for entry in &entries {
        let target = format!(
            "{}@{}",
            entry.user.as_deref().unwrap_or("?"),
            entry.hostname.as_deref().unwrap_or("?"),
        );
        let identity = entry.identity_file.as_deref().unwrap_or("-");
        app.output.kv(&entry.alias, &format!("{target}  ({identity})"));
    }
    Ok(())
}
