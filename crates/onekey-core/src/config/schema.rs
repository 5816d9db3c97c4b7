//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main One Key configuration.
///
/// Holds only names and labels. The master secret itself never appears in
/// the config file; `vault.secret_env` names the variable it is read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Vault boot settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Credentials derived eagerly when the vault boots.
    #[serde(default)]
    pub bindings: Vec<CredentialBinding>,
}

/// Vault configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Name of the environment variable holding the master secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

fn default_secret_env() -> String {
    crate::env::vars::ONEKEY_MASTER_SECRET.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(domain, service)` pair the vault derives a credential for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialBinding {
    /// Derivation domain, e.g. `COLLAB`.
    pub domain: String,

    /// Service within the domain, e.g. `SLACK_BOT_TOKEN`.
    pub service: String,
}

impl CredentialBinding {
    /// Create a new binding.
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
        }
    }

    /// The collaboration integrations every deployment talks to.
    pub fn collaboration_defaults() -> Vec<Self> {
        vec![
            Self::new("COLLAB", "NOTION_TOKEN"),
            Self::new("COLLAB", "LINEAR_API_KEY"),
            Self::new("COLLAB", "SLACK_BOT_TOKEN"),
        ]
    }
}

impl fmt::Display for CredentialBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.service)
    }
}
