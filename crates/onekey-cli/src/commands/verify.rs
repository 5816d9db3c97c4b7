//! `onekey verify` - check a credential value without printing the real one.

use clap::Args;
use onekey_core::Config;

use super::{open_vault, SecretArgs};

/// Verify command arguments.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Derivation domain
    pub domain: String,

    /// Service within the domain
    pub service: String,

    /// Value to check (if omitted, prompts for hidden input)
    #[arg(long)]
    pub value: Option<String>,

    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Run the verify command.
pub async fn run(args: VerifyArgs, config: &Config) -> anyhow::Result<()> {
    let candidate = match args.value {
        Some(v) => v,
        None => {
            let prompt = format!("Enter value for {}/{}: ", args.domain, args.service);
            rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read value: {}", e))?
        }
    };

    let vault = open_vault(&args.secret, config)?;
    let result = vault.verify_credential(&args.domain, &args.service, &candidate);
    vault.lock();

    if result? {
        println!("match");
        Ok(())
    } else {
        println!("mismatch");
        anyhow::bail!("credential for {}/{} does not match", args.domain, args.service)
    }
}
