//! Error types for the credential vault.
//!
//! Variants carry labels only. No variant ever holds secret or derived
//! key material, so errors are safe to log and display.

use thiserror::Error;

/// Errors that can occur during vault operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("Invalid master secret: must not be empty")]
    InvalidSecret,

    #[error("Master secret variable {var} is not set")]
    MissingSecret { var: String },

    #[error("Vault is locked")]
    Locked,

    #[error("Invalid credential request {domain}/{service}: {reason}")]
    InvalidRequest {
        domain: String,
        service: String,
        reason: &'static str,
    },
}

impl VaultError {
    /// Whether retrying the same call could succeed.
    ///
    /// Always `false`: a locked vault stays locked and bad input stays bad.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
