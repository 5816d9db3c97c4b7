//! Configuration loading and persistence.

use super::{Config, CredentialBinding, LogLevel};
use crate::error::ConfigError;
use crate::paths;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to the default path.
    pub fn save_default(&self) -> Result<(), ConfigError> {
        let path = paths::config_file()?;
        self.save(&path)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // 1. The secret variable name must be usable
        let secret_env = self.vault.secret_env.as_str();
        if secret_env.trim().is_empty() {
            errors.push("vault.secret_env must not be empty".to_string());
        } else if secret_env.chars().any(char::is_whitespace) {
            errors.push(format!(
                "vault.secret_env '{}' must not contain whitespace",
                secret_env
            ));
        } else if secret_env.contains('=') || secret_env.contains('\0') {
            errors.push(format!(
                "vault.secret_env '{}' is not a valid environment variable name",
                secret_env
            ));
        }

        // 2. Binding labels must be non-empty and unique
        let mut seen = HashSet::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            if binding.domain.is_empty() {
                errors.push(format!("Binding [{}]: domain must not be empty", i));
            }
            if binding.service.is_empty() {
                errors.push(format!("Binding [{}]: service must not be empty", i));
            }
            if !seen.insert(binding) {
                errors.push(format!("Binding [{}]: duplicate binding {}", i, binding));
            }
        }

        // Return collected errors
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Load the default config file, or fall back to defaults when it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable config file: {e}");
                Self::default()
            }
        }
    }

    /// The configuration written by `onekey config init`.
    pub fn starter() -> Self {
        ConfigBuilder::new()
            .bindings(CredentialBinding::collaboration_defaults())
            .build()
    }
}

/// Configuration builder for creating configs programmatically.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment variable holding the master secret.
    pub fn secret_env(mut self, name: impl Into<String>) -> Self {
        self.config.vault.secret_env = name.into();
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Enable JSON log output.
    pub fn json_logs(mut self, json: bool) -> Self {
        self.config.logging.json = json;
        self
    }

    /// Add a single credential binding.
    pub fn binding(mut self, domain: impl Into<String>, service: impl Into<String>) -> Self {
        self.config
            .bindings
            .push(CredentialBinding::new(domain, service));
        self
    }

    /// Add several credential bindings.
    pub fn bindings(mut self, bindings: impl IntoIterator<Item = CredentialBinding>) -> Self {
        self.config.bindings.extend(bindings);
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        self.config
    }

    /// Validate and build the config, returning an error if validation fails.
    pub fn build_validated(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
