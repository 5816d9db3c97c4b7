//! End-to-end vault lifecycle tests.
//!
//! Boot from config and environment, hand the vault to several integration
//! clients, and lock it the way an operator interrupt would.

use std::sync::Arc;
use std::time::Duration;

use onekey_core::config::{Config, ConfigBuilder};
use onekey_integration_tests::IntegrationClient;
use onekey_vault::{CredentialVault, VaultError, VaultState};

fn boot(config: &Config, secret: &str) -> Arc<CredentialVault> {
    std::env::set_var(&config.vault.secret_env, secret);
    Arc::new(CredentialVault::from_env(&config.vault.secret_env).unwrap())
}

#[test]
fn test_boot_from_config_and_derive_bindings() {
    let config = ConfigBuilder::new()
        .secret_env("ONEKEY_IT_BOOT_SECRET")
        .bindings(Config::starter().bindings)
        .build();
    let vault = boot(&config, "s3cr3t-seed");

    for binding in &config.bindings {
        let cred = vault.get_credential(&binding.domain, &binding.service).unwrap();
        assert_eq!(cred.len(), 128);
    }
    assert_eq!(vault.cached_len(), config.bindings.len());
}

#[test]
fn test_restart_regenerates_same_credentials() {
    let config = ConfigBuilder::new()
        .secret_env("ONEKEY_IT_RESTART_SECRET")
        .build();

    let first = boot(&config, "s3cr3t-seed");
    let before = first.get_credential("COLLAB", "SLACK_BOT_TOKEN").unwrap();
    first.lock();
    drop(first);

    let second = boot(&config, "s3cr3t-seed");
    let after = second.get_credential("COLLAB", "SLACK_BOT_TOKEN").unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_integrations_fail_after_lock() {
    let vault = Arc::new(CredentialVault::new("s3cr3t-seed").unwrap());
    let clients: Vec<IntegrationClient> = [
        ("COLLAB", "NOTION_TOKEN"),
        ("COLLAB", "LINEAR_API_KEY"),
        ("COLLAB", "SLACK_BOT_TOKEN"),
    ]
    .into_iter()
    .map(|(domain, service)| IntegrationClient {
        domain,
        service,
        source: vault.clone(),
    })
    .collect();

    for client in &clients {
        assert!(client.authorization().unwrap().starts_with("Bearer "));
    }

    vault.lock();
    assert_eq!(vault.state(), VaultState::Locked);

    for client in &clients {
        let err = client.authorization().unwrap_err();
        assert_eq!(err, VaultError::Locked);
        assert!(!err.is_retryable());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_lock_during_concurrent_requests() {
    let vault = Arc::new(CredentialVault::new("s3cr3t-seed").unwrap());
    let expected = vault.get_credential("AI_OPS", "GITHUB_TOKEN").unwrap();

    let mut workers = Vec::new();
    for _ in 0..4 {
        let vault = Arc::clone(&vault);
        let expected = expected.clone();
        workers.push(tokio::spawn(async move {
            loop {
                match vault.get_credential("AI_OPS", "GITHUB_TOKEN") {
                    Ok(cred) => assert_eq!(cred, expected),
                    Err(VaultError::Locked) => break,
                    Err(other) => panic!("unexpected error: {other}"),
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    vault.lock();

    for worker in workers {
        worker.await.unwrap();
    }
    assert!(vault.is_locked());
    assert_eq!(vault.cached_len(), 0);
}

#[test]
fn test_empty_secret_never_yields_vault() {
    assert!(matches!(
        CredentialVault::new(""),
        Err(VaultError::InvalidSecret)
    ));

    std::env::set_var("ONEKEY_IT_EMPTY_SECRET", "");
    assert!(matches!(
        CredentialVault::from_env("ONEKEY_IT_EMPTY_SECRET"),
        Err(VaultError::MissingSecret { .. })
    ));
}
