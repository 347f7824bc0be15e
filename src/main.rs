//! Rigup CLI - provision a developer workstation and its SSH host credentials

use clap::Parser;

use rigup_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
