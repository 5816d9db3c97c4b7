//! Environment variable handling.

use crate::secret::SecretString;
use std::env;
use std::path::Path;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read a secret-bearing environment variable.
///
/// The value is moved straight into a [`SecretString`]; unset and empty
/// variables both yield `None`.
pub fn get_secret(name: &str) -> Option<SecretString> {
    get_var(name).map(SecretString::from)
}

/// Check whether a variable is set to a non-empty value without reading it
/// into a long-lived buffer.
pub fn is_set(name: &str) -> bool {
    env::var_os(name).is_some_and(|v| !v.is_empty())
}

/// Load environment variables from a .env file in the working directory.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    load_dotenv_from(Path::new(".env"))
}

/// Load environment variables from the given dotenv file.
///
/// Variables that are already set are left untouched.
pub fn load_dotenv_from(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse KEY=value
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            // Remove quotes if present
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);

            if env::var(key).is_err() {
                env::set_var(key, value);
            }
        }
    }
    Ok(())
}

/// Common environment variable names.
pub mod vars {
    /// Default variable holding the master secret.
    pub const ONEKEY_MASTER_SECRET: &str = "ONEKEY_MASTER_SECRET";

    /// One Key home directory override.
    pub const ONEKEY_HOME: &str = "ONEKEY_HOME";

    /// One Key config file override.
    pub const ONEKEY_CONFIG: &str = "ONEKEY_CONFIG";

    /// One Key log filter, consulted when `RUST_LOG` is unset.
    pub const ONEKEY_LOG: &str = "ONEKEY_LOG";
}
