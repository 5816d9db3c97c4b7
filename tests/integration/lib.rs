//! Shared fixtures for the One Key integration tests.

use std::sync::Arc;

use onekey_vault::{CredentialSource, VaultError};

/// Stand-in for an HTTP integration that only ever sees a credential source.
pub struct IntegrationClient {
    pub domain: &'static str,
    pub service: &'static str,
    pub source: Arc<dyn CredentialSource>,
}

impl IntegrationClient {
    /// Build the `Authorization` header value for this integration.
    pub fn authorization(&self) -> Result<String, VaultError> {
        let credential = self.source.get_credential(self.domain, self.service)?;
        Ok(format!("Bearer {}", credential.expose()))
    }
}
