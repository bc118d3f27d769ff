//! Command-line interface definitions and dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::App;
use crate::config::Config;
use crate::error::Result;

/// On-chain investment fund provisioning CLI
#[derive(Parser, Debug)]
#[command(name = "fundctl")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "fundctl.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the fundctl CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a new fund end to end
    Run(RunArgs),

    /// Resume an interrupted run from the first unconfirmed stage
    Resume(RunArgs),

    /// Run offline checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `fundctl check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Resolve the configuration and registry without touching the network
    Config(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the deployment registry path from the config file
    #[arg(long)]
    pub deployment: Option<PathBuf>,
}

/// Dispatch a parsed command against loaded configuration.
///
/// # Errors
///
/// Propagates whatever the selected command fails with.
pub async fn execute(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Run(args) => App::run(config, args.deployment).await,
        Commands::Resume(args) => App::resume(config, args.deployment).await,
        Commands::Check(CheckCommand::Config(args)) => App::check(&config, args.deployment),
    }
}
