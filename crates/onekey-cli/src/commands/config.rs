//! Configuration management commands.

use clap::Args;
use onekey_core::config::Config;
use onekey_core::paths;
use std::path::PathBuf;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show configuration
    Show,

    /// Write a starter configuration with the collaboration bindings
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

/// Run the config command.
///
/// `config_path` is the `--config` override, if any.
pub async fn run(args: ConfigArgs, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let custom_path = config_path.is_some();
    let path = super::config_path(config_path)?;

    match args.command {
        ConfigCommand::Show => {
            let config = if path.exists() {
                Config::load(&path)?
            } else {
                Config::default()
            };
            println!("{}", config.to_json5()?);
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {:?}. Use --force to overwrite.",
                    path
                );
            }

            if !custom_path {
                paths::ensure_dirs()?;
            }
            Config::starter().save(&path)?;
            println!("Created config file: {:?}", path);
            println!(
                "  Tip: export {} before running 'onekey serve'.",
                onekey_core::env::vars::ONEKEY_MASTER_SECRET
            );
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Validate => match Config::load(&path) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => anyhow::bail!("Configuration error: {}", e),
            },
            Err(e) => anyhow::bail!("Failed to load config: {}", e),
        },
    }

    Ok(())
}
