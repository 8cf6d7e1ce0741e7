use crate::error::RelayError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::env;

/// Supplies the Gemini API key for a single relay call.
#[async_trait]
pub trait ApiKeySource: Send + Sync {
    /// Returns the current key, or a configuration error when none is set.
    async fn api_key(&self) -> Result<SecretString, RelayError>;
}

/// Reads the key from the process environment on every call.
pub struct EnvApiKey {
    var: String,
}

impl EnvApiKey {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl ApiKeySource for EnvApiKey {
    async fn api_key(&self) -> Result<SecretString, RelayError> {
        match env::var(&self.var) {
            Ok(key) if !key.is_empty() => Ok(SecretString::new(key)),
            _ => Err(RelayError::missing_api_key()),
        }
    }
}

/// Fixed key, or none at all. Used when the key is provisioned by the caller
/// of the library rather than the environment.
pub struct StaticApiKey {
    key: Option<SecretString>,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(SecretString::new(key.into())),
        }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }
}

#[async_trait]
impl ApiKeySource for StaticApiKey {
    async fn api_key(&self) -> Result<SecretString, RelayError> {
        match &self.key {
            Some(key) if !key.expose_secret().is_empty() => {
                Ok(SecretString::new(key.expose_secret().clone()))
            }
            _ => Err(RelayError::missing_api_key()),
        }
    }
}
