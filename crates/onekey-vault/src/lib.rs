//! Credential derivation vault for One Key.
//!
//! A single master secret derives every per-domain, per-service credential
//! through two chained HMAC-SHA512 steps. Derived values are memoized in
//! memory only, and [`CredentialVault::lock`] wipes both the secret and the
//! cache for the rest of the process.

pub mod derive;
pub mod error;
pub mod types;
pub mod vault;

pub use error::{Result, VaultError};
pub use types::{CredentialKey, DerivedCredential, VaultState};
pub use vault::{CredentialSource, CredentialVault};
