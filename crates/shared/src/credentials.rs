//! Credential sources for upstream API keys
//!
//! Credentials are resolved on every request instead of being captured at
//! startup, so a key rotated in the environment takes effect on the next call
//! without a restart.
//!
//! - [`EnvCredentials`] - reads the process environment (production)
//! - [`StaticCredentials`] - fixed in-memory set (tests, embedded use)
//!
//! # Security
//!
//! Values are returned as [`SecretString`] so they never show up in `Debug`
//! output. An empty value is treated the same as a missing one.

use secrecy::SecretString;
use std::collections::HashMap;
use std::env;

/// Environment key holding the AssemblyAI API key
pub const ASSEMBLYAI_API_KEY: &str = "ASSEMBLYAI_API_KEY";

/// Environment key holding the Claude API key
pub const CLAUDE_API_KEY: &str = "CLAUDE_API_KEY";

/// Source of upstream credentials, queried once per forwarded request
pub trait CredentialSource: Send + Sync {
    /// Resolve the credential stored under `key`.
    ///
    /// Returns `None` when the credential is absent or empty.
    fn resolve(&self, key: &str) -> Option<SecretString>;
}

/// Reads credentials from the process environment on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn resolve(&self, key: &str) -> Option<SecretString> {
        env::var(key)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::new)
    }
}

/// Fixed set of credentials held in memory
#[derive(Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential under `key`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("StaticCredentials")
            .field("keys", &keys)
            .finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self, key: &str) -> Option<SecretString> {
        self.values
            .get(key)
            .filter(|value| !value.is_empty())
            .map(|value| SecretString::new(value.clone()))
    }
}
