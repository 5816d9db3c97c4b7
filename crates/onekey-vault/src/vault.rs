//! The credential vault.
//!
//! [`CredentialVault`] owns the master secret and a cache of derived
//! credentials behind a single mutex. Derivation runs while the mutex is
//! held, so [`CredentialVault::lock`] is totally ordered with every
//! in-flight request: a caller either sees an active vault with the full
//! secret, or a locked one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use onekey_core::{env, SecretString};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::derive;
use crate::error::{Result, VaultError};
use crate::types::{CredentialKey, DerivedCredential, VaultState};

/// Anything integration code can ask for a credential.
///
/// Integrations hold a `CredentialSource` rather than the secret, so the
/// vault stays the only owner of key material.
pub trait CredentialSource: Send + Sync {
    /// Return the credential for `(domain, service)`.
    fn get_credential(&self, domain: &str, service: &str) -> Result<DerivedCredential>;
}

/// Secret and cache of an active vault. Dropped as a unit on lock.
struct Unlocked {
    secret: Zeroizing<Vec<u8>>,
    cache: HashMap<CredentialKey, DerivedCredential>,
}

impl Unlocked {
    fn wipe(&mut self) {
        self.secret.zeroize();
        for (_, mut credential) in self.cache.drain() {
            credential.zeroize();
        }
    }
}

/// Derives and caches per-`(domain, service)` credentials from one master
/// secret.
///
/// Not `Clone`: share it with `Arc<CredentialVault>`.
pub struct CredentialVault {
    // `None` once locked.
    inner: Mutex<Option<Unlocked>>,
}

impl CredentialVault {
    /// Create a vault that takes ownership of `master_secret`.
    ///
    /// Fails with [`VaultError::InvalidSecret`] if the secret is empty.
    pub fn new(master_secret: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = Zeroizing::new(master_secret.into());
        if secret.is_empty() {
            return Err(VaultError::InvalidSecret);
        }

        info!("credential vault active");
        Ok(Self {
            inner: Mutex::new(Some(Unlocked {
                secret,
                cache: HashMap::new(),
            })),
        })
    }

    /// Create a vault from a secret already held in a [`SecretString`].
    pub fn from_secret_string(secret: &SecretString) -> Result<Self> {
        Self::new(secret.expose_bytes().to_vec())
    }

    /// Create a vault from the environment variable `var`.
    ///
    /// Unset and empty variables both fail with
    /// [`VaultError::MissingSecret`].
    pub fn from_env(var: &str) -> Result<Self> {
        let secret = env::get_secret(var).ok_or_else(|| VaultError::MissingSecret {
            var: var.to_string(),
        })?;
        Self::from_secret_string(&secret)
    }

    /// Return the credential for `(domain, service)`, deriving it on first
    /// use.
    ///
    /// Repeated calls on the same vault return the identical value. Fails
    /// with [`VaultError::Locked`] after [`lock`](Self::lock), whatever the
    /// labels, and with [`VaultError::InvalidRequest`] for empty labels.
    pub fn get_credential(&self, domain: &str, service: &str) -> Result<DerivedCredential> {
        let mut guard = self.inner.lock();
        let Some(unlocked) = guard.as_mut() else {
            warn!(domain, service, "credential requested from locked vault");
            return Err(VaultError::Locked);
        };

        validate_request(domain, service)?;

        let Unlocked { secret, cache } = unlocked;
        let credential = match cache.entry(CredentialKey::new(domain, service)) {
            Entry::Occupied(entry) => {
                debug!(domain, service, "credential cache hit");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let derived = derive::derive_credential(secret.as_slice(), domain, service);
                debug!(domain, service, "derived credential");
                entry.insert(derived).clone()
            }
        };

        Ok(credential)
    }

    /// Check `candidate` against the credential for `(domain, service)` in
    /// constant time.
    pub fn verify_credential(&self, domain: &str, service: &str, candidate: &str) -> Result<bool> {
        let credential = self.get_credential(domain, service)?;
        Ok(credential.matches(candidate))
    }

    /// Wipe the master secret and every cached credential.
    ///
    /// Irreversible and idempotent. Never fails, and the mutex does not
    /// poison, so this also works after another caller panicked.
    pub fn lock(&self) {
        let mut guard = self.inner.lock();
        if let Some(mut unlocked) = guard.take() {
            let wiped = unlocked.cache.len();
            unlocked.wipe();
            info!(wiped, "credential vault locked; master secret purged");
        }
    }

    /// Whether [`lock`](Self::lock) has been called.
    pub fn is_locked(&self) -> bool {
        self.inner.lock().is_none()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VaultState {
        if self.is_locked() {
            VaultState::Locked
        } else {
            VaultState::Active
        }
    }

    /// Number of credentials derived so far. Zero once locked.
    pub fn cached_len(&self) -> usize {
        self.inner.lock().as_ref().map_or(0, |u| u.cache.len())
    }
}

/// Reject empty labels.
fn validate_request(domain: &str, service: &str) -> Result<()> {
    let reason = if domain.is_empty() {
        "domain must not be empty"
    } else if service.is_empty() {
        "service must not be empty"
    } else {
        return Ok(());
    };

    Err(VaultError::InvalidRequest {
        domain: domain.to_string(),
        service: service.to_string(),
        reason,
    })
}

impl fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialVault")
            .field("state", &self.state())
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}

impl CredentialSource for CredentialVault {
    fn get_credential(&self, domain: &str, service: &str) -> Result<DerivedCredential> {
        CredentialVault::get_credential(self, domain, service)
    }
}

impl<T: CredentialSource + ?Sized> CredentialSource for Arc<T> {
    fn get_credential(&self, domain: &str, service: &str) -> Result<DerivedCredential> {
        (**self).get_credential(domain, service)
    }
}
