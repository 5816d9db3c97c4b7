//! One Key CLI entry point.

use clap::Parser;
use onekey_cli::{run, Cli};
use onekey_core::{env, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the log filter: `RUST_LOG`, then `ONEKEY_LOG`, then the config
/// level raised by each `-v`.
fn env_filter(verbose: u8, config: &Config) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if let Some(directive) = env::get_var(env::vars::ONEKEY_LOG) {
        return EnvFilter::new(directive);
    }

    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::new(format!(
        "onekey={level},onekey_cli={level},onekey_vault={level},onekey_core={level}"
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Pick up ONEKEY_MASTER_SECRET and friends from a local .env
    env::load_dotenv()?;

    let config = cli.load_config()?;

    // Initialize logging
    let filter = env_filter(cli.verbose, &config);
    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Run the command
    run(cli, config).await
}
