//! Core types for the credential vault.

use onekey_core::{constant_time_eq, SecretString};
use std::fmt;
use zeroize::Zeroize;

/// Composite cache key identifying one derived credential.
///
/// Kept as two fields rather than a joined string so that `("AB", "C")`
/// and `("A", "BC")` can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    /// Derivation domain, e.g. `AI_OPS`.
    pub domain: String,

    /// Service within the domain, e.g. `GITHUB_TOKEN`.
    pub service: String,
}

impl CredentialKey {
    /// Create a new key.
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.service)
    }
}

/// A credential derived from the master secret.
///
/// Holds the lowercase hex encoding of a SHA-512 sized MAC. Wraps
/// `SecretString` so the value is zeroed on drop. Debug and Display both
/// emit `[REDACTED]`, and equality runs in constant time.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedCredential {
    inner: SecretString,
}

impl DerivedCredential {
    /// Length of every derived credential, in hex characters.
    pub const HEX_LEN: usize = 128;

    pub(crate) fn from_hex(hex: String) -> Self {
        Self {
            inner: SecretString::new(hex),
        }
    }

    /// Expose the credential value. Use sparingly.
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Compare against a caller-supplied value in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.inner.expose_bytes(), candidate.as_bytes())
    }

    /// Length of the encoded credential.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True only once the credential has been wiped.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Zeroize for DerivedCredential {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl fmt::Debug for DerivedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for DerivedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Lifecycle state of a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// Secret present, derivation allowed.
    Active,

    /// Secret wiped. Terminal.
    Locked,
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultState::Active => f.write_str("active"),
            VaultState::Locked => f.write_str("locked"),
        }
    }
}
