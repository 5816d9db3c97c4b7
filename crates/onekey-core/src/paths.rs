//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the One Key base directory (`$ONEKEY_HOME`, else `~/.onekey`).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = env::get_var(env::vars::ONEKEY_HOME) {
        return Ok(expand_tilde(&home));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".onekey"))
}

/// Get the main config file path (`$ONEKEY_CONFIG`, else `<base>/onekey.json5`).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(env::vars::ONEKEY_CONFIG) {
        return Ok(expand_tilde(&path));
    }
    Ok(base_dir()?.join("onekey.json5"))
}

/// Ensure the base directory exists.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    let dir = base_dir()?;
    std::fs::create_dir_all(&dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/test");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let not_expanded = expand_tilde("/absolute/path");
        assert_eq!(not_expanded, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_config_file_name() {
        if env::get_var(env::vars::ONEKEY_CONFIG).is_none() {
            let file = config_file().unwrap();
            assert!(file.ends_with("onekey.json5"));
        }
    }
}
