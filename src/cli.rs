//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;

/// Provision a developer workstation and its SSH host credentials
#[derive(Parser)]
#[command(
    name = "rigup",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip interactive prompts (also set by CI / RIGUP_YES env vars)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage host aliases and their SSH credentials
    #[command(subcommand)]
    Registry(commands::registry::RegistryCommand),

    /// Run the ordered workstation provisioning steps
    Setup,

    /// Diagnose platform, tools, and agent availability
    Doctor,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            yes,
            command,
        } = self;
        let app = AppContext::new(no_color, quiet, json, yes);
        match command {
            Command::Registry(cmd) => commands::registry::run(&app, cmd).await,
            Command::Setup => commands::setup::run(&app).await,
            Command::Doctor => commands::doctor::run(&app).await,
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
        }
    }
}
