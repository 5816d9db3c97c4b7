//! # onekey-core
//!
//! Shared utilities for One Key.
//!
//! - **Configuration**: Loading, validation, and persistence of the JSON5 config file
//! - **Secrets**: Redacted, zero-on-drop string handling and constant-time comparison
//! - **Utilities**: Path resolution and environment handling

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::{constant_time_eq, SecretString};
