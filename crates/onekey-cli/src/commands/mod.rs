//! CLI command implementations.

pub mod config;
pub mod derive;
pub mod doctor;
pub mod serve;
pub mod verify;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;
use onekey_core::{env, paths, Config, SecretString};
use onekey_vault::CredentialVault;

/// Where to find the master secret.
#[derive(Args, Debug, Clone, Default)]
pub struct SecretArgs {
    /// Environment variable holding the master secret (overrides vault.secret_env)
    #[arg(long, value_name = "VAR")]
    pub secret_env: Option<String>,

    /// Read the master secret from a hidden terminal prompt
    #[arg(long)]
    pub prompt: bool,
}

impl SecretArgs {
    /// Resolve the variable name: flag first, then config.
    pub fn resolve<'a>(&'a self, config: &'a Config) -> &'a str {
        self.secret_env
            .as_deref()
            .unwrap_or(config.vault.secret_env.as_str())
            .trim()
    }
}

/// The config file a command should read: `--config` if given, else the
/// default location.
pub fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(paths::config_file()?),
    }
}

/// Prompt when asked to, or when the variable is missing and someone is at
/// the terminal to answer.
fn should_prompt(requested: bool, var_set: bool, interactive: bool) -> bool {
    requested || (!var_set && interactive)
}

/// Boot a vault from the environment, or from a hidden prompt.
pub fn open_vault(secret: &SecretArgs, config: &Config) -> anyhow::Result<CredentialVault> {
    open_vault_with(secret, config, std::io::stdin().is_terminal())
}

fn open_vault_with(
    secret: &SecretArgs,
    config: &Config,
    interactive: bool,
) -> anyhow::Result<CredentialVault> {
    let var = secret.resolve(config);

    if should_prompt(secret.prompt, env::is_set(var), interactive) {
        if !interactive {
            anyhow::bail!("--prompt needs an interactive terminal; export {var} instead");
        }
        let value = rpassword::prompt_password("Enter the One Key: ")
            .map_err(|e| anyhow::anyhow!("Failed to read master secret: {}", e))?;
        let value = SecretString::new(value);
        tracing::debug!("master secret read from prompt");
        return Ok(CredentialVault::from_secret_string(&value)?);
    }

    tracing::debug!(var, "reading master secret");
    CredentialVault::from_env(var).map_err(|e| {
        anyhow::anyhow!("{e}. Export the master secret before starting One Key")
    })
}
