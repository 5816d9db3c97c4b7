//! `onekey derive` - print one derived credential.

use clap::Args;
use onekey_core::Config;

use super::{open_vault, SecretArgs};

/// Derive command arguments.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Derivation domain (e.g. AI_OPS)
    pub domain: String,

    /// Service within the domain (e.g. GITHUB_TOKEN)
    pub service: String,

    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Run the derive command.
pub async fn run(args: DeriveArgs, config: &Config) -> anyhow::Result<()> {
    let vault = open_vault(&args.secret, config)?;
    let result = vault.get_credential(&args.domain, &args.service);
    vault.lock();

    let credential = result?;
    println!("{}", credential.expose());
    Ok(())
}
