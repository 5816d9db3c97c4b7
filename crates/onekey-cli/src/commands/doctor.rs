//! Diagnostic commands.

use clap::Args;
use console::{style, Emoji};
use onekey_core::config::Config;
use onekey_core::error::ConfigError;
use onekey_core::{env, paths};
use onekey_vault::CredentialVault;
use std::path::PathBuf;

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");
static WARN: Emoji = Emoji("⚠", "!");

/// Doctor command arguments.
#[derive(Args)]
pub struct DoctorArgs {
    /// Also boot a throwaway vault and derive the configured bindings
    #[arg(long)]
    pub full: bool,
}

/// Run the doctor command.
///
/// `config_path` is the `--config` override, if any.
pub async fn run(
    args: DoctorArgs,
    config: &Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("One Key Doctor\n");

    let mut errors = 0;
    let mut warnings = 0;

    // Check directories
    println!("Checking directories...");

    match paths::base_dir() {
        Ok(dir) => {
            if dir.exists() {
                println!("  {} Base directory exists: {:?}", style(CHECK).green(), dir);
            } else {
                println!("  {} Base directory missing: {:?}", style(WARN).yellow(), dir);
                warnings += 1;
            }
        }
        Err(e) => {
            println!("  {} Failed to determine base directory: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }

    // Check config
    println!("\nChecking configuration...");

    let path = super::config_path(config_path)?;
    match Config::load(&path) {
        Ok(_) => println!("  {} Configuration file loaded: {:?}", style(CHECK).green(), path),
        Err(ConfigError::NotFound(_)) => {
            println!(
                "  {} Configuration file not found, using defaults: {:?}",
                style(WARN).yellow(),
                path
            );
            println!("    Run 'onekey config init' to create one");
            warnings += 1;
        }
        Err(e) => {
            println!("  {} Configuration error: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }

    match config.validate() {
        Ok(_) => println!("  {} Configuration valid", style(CHECK).green()),
        Err(e) => {
            println!("  {} Configuration invalid: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }

    // Check environment. Only presence is reported, never the value.
    println!("\nChecking environment...");

    let var = config.vault.secret_env.trim();
    let secret_present = env::is_set(var);
    if secret_present {
        println!("  {} {} is set", style(CHECK).green(), var);
    } else {
        println!("  {} {} not set", style(CROSS).red(), var);
        errors += 1;
    }

    if args.full && secret_present {
        println!("\nChecking derivation...");
        match CredentialVault::from_env(var) {
            Ok(vault) => {
                let failed = config
                    .bindings
                    .iter()
                    .filter(|b| vault.get_credential(&b.domain, &b.service).is_err())
                    .count();
                vault.lock();

                if failed == 0 {
                    println!(
                        "  {} Derived {} binding(s)",
                        style(CHECK).green(),
                        config.bindings.len()
                    );
                } else {
                    println!("  {} {} binding(s) failed to derive", style(CROSS).red(), failed);
                    errors += 1;
                }
            }
            Err(e) => {
                println!("  {} Vault failed to boot: {}", style(CROSS).red(), e);
                errors += 1;
            }
        }
    }

    // Summary
    println!("\n{}", style("Summary").bold());
    let errors_style = if errors > 0 { style(errors).red() } else { style(errors).green() };
    let warnings_style = if warnings > 0 {
        style(warnings).yellow()
    } else {
        style(warnings).green()
    };
    println!("  Errors: {}", errors_style);
    println!("  Warnings: {}", warnings_style);

    if errors > 0 {
        anyhow::bail!("{} error(s) found", errors);
    }

    Ok(())
}
