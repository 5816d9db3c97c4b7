//! One Key command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use onekey_core::error::ConfigError;
use onekey_core::Config;
use std::path::PathBuf;

/// One Key - derive every service credential from a single master secret
#[derive(Parser)]
#[command(name = "onekey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "ONEKEY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the config named by `--config`, or the default one.
    ///
    /// An explicit path must exist, except for `config` subcommands which
    /// may be about to create it. The default path falls back to defaults.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config else {
            return Ok(Config::load_or_default());
        };

        match Config::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) if matches!(self.command, Commands::Config(_)) => {
                Ok(Config::default())
            }
            Err(e) => anyhow::bail!("Failed to load config {}: {}", path.display(), e),
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Derive and print one credential
    Derive(commands::derive::DeriveArgs),

    /// Check a credential value against its derivation
    Verify(commands::verify::VerifyArgs),

    /// Boot the vault, derive configured bindings, and lock on Ctrl-C
    Serve(commands::serve::ServeArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Run diagnostics
    Doctor(commands::doctor::DoctorArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let config_path = cli.config;
    match cli.command {
        Commands::Derive(args) => commands::derive::run(args, &config).await,
        Commands::Verify(args) => commands::verify::run(args, &config).await,
        Commands::Serve(args) => commands::serve::run(args, &config).await,
        Commands::Config(args) => commands::config::run(args, config_path).await,
        Commands::Doctor(args) => commands::doctor::run(args, &config, config_path).await,
        Commands::Version => {
            println!("onekey {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
