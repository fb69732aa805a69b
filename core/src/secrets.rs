//! Credential resolution for provider backends.
//!
//! The external secret store boundary is the process environment: each
//! provider names the variable holding its API key. Lookups are memoized
//! for the process lifetime, and a missing name is a typed error so
//! startup can fail fast for providers that are actually in play.

use std::collections::HashMap;

use tracing::debug;

use crate::{IncognitoError, Result};

/// Name -> value credential lookup with a per-process memo cache.
#[derive(Debug, Default)]
pub struct SecretStore {
    cache: HashMap<String, String>,
}

impl SecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a named credential, caching the value for later lookups.
    pub fn resolve(&mut self, name: &str) -> Result<String> {
        if let Some(value) = self.cache.get(name) {
            return Ok(value.clone());
        }
        let value = std::env::var(name)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| IncognitoError::MissingSecret(name.to_string()))?;
        debug!(target = "secrets", secret = %name, "resolved credential");
        self.cache.insert(name.to_string(), value.clone());
        Ok(value)
    }
}
