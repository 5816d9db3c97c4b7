//! `onekey serve` - hold the vault for the life of the process.
//!
//! Boots the vault from the environment, derives every configured binding
//! up front so a missing secret fails at boot rather than mid-run, then
//! waits for Ctrl-C. Locking the vault is always the last thing it does.

use clap::Args;
use onekey_core::Config;
use onekey_vault::{CredentialSource, CredentialVault};
use tracing::{info, warn};

use super::{open_vault, SecretArgs};

/// Serve command arguments.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Derive the bindings, lock, and exit instead of waiting for Ctrl-C
    #[arg(long)]
    pub once: bool,

    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Refusing to start: {}", e))?;

    let vault = open_vault(&args.secret, config)?;
    let result = serve(&vault, config, args.once).await;

    vault.lock();
    println!("Vault locked. Master secret purged from memory.");
    result
}

async fn serve(vault: &CredentialVault, config: &Config, once: bool) -> anyhow::Result<()> {
    let derived = derive_bindings(vault, config)?;
    println!("Vault active: {} credential(s) derived.", derived);

    if once {
        return Ok(());
    }

    println!("Press Ctrl-C to lock the vault and exit.");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to listen for Ctrl-C: {}", e))?;
    warn!("interrupt received, locking vault");
    Ok(())
}

/// Derive every configured binding, returning how many were derived.
pub fn derive_bindings(source: &dyn CredentialSource, config: &Config) -> anyhow::Result<usize> {
    for binding in &config.bindings {
        source
            .get_credential(&binding.domain, &binding.service)
            .map_err(|e| anyhow::anyhow!("Failed to derive {}: {}", binding, e))?;
        info!(domain = %binding.domain, service = %binding.service, "credential ready");
    }
    Ok(config.bindings.len())
}
