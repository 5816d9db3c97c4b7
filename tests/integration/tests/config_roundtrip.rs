//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use onekey_core::config::{Config, ConfigBuilder, CredentialBinding, LogLevel};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("onekey.json5");

    let config = Config::starter();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.vault.secret_env, config.vault.secret_env);
    assert_eq!(loaded.bindings, CredentialBinding::collaboration_defaults());
    assert_eq!(loaded.logging.level, LogLevel::Info);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("onekey.json5");

    let config = ConfigBuilder::new()
        .secret_env("COMMANDER_ONE_KEY")
        .log_level(LogLevel::Debug)
        .json_logs(true)
        .binding("REVENUE", "STRIPE_SECRET")
        .build();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.vault.secret_env, "COMMANDER_ONE_KEY");
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    assert!(loaded.logging.json);
    assert_eq!(loaded.bindings[0].to_string(), "REVENUE/STRIPE_SECRET");
}

#[test]
fn test_saved_config_never_holds_secret() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("onekey.json5");

    std::env::set_var("ONEKEY_ROUNDTRIP_SECRET", "do-not-persist-me");
    let config = ConfigBuilder::new()
        .secret_env("ONEKEY_ROUNDTRIP_SECRET")
        .build();
    config.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("ONEKEY_ROUNDTRIP_SECRET"));
    assert!(!raw.contains("do-not-persist-me"));
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/onekey.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
