use crate::domain::ports::{ConfigProvider, Credentials};
use crate::utils::error::{BatchClientError, Result};
use async_trait::async_trait;
use std::sync::Arc;

fn bearer(token: &str) -> String {
    let token = token.trim();
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

/// A fixed OAuth access token.
#[derive(Clone)]
pub struct BearerTokenCredentials {
    token: String,
}

impl BearerTokenCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenCredentials")
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl Credentials for BearerTokenCredentials {
    async fn authorization(&self) -> Result<Option<String>> {
        Ok(Some(bearer(&self.token)))
    }
}

/// Reads the token from an environment variable on every request, so a
/// token refreshed by an outside process is picked up without a restart.
#[derive(Debug, Clone)]
pub struct EnvTokenCredentials {
    variable: String,
}

impl EnvTokenCredentials {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

#[async_trait]
impl Credentials for EnvTokenCredentials {
    async fn authorization(&self) -> Result<Option<String>> {
        match std::env::var(&self.variable) {
            Ok(token) if !token.trim().is_empty() => Ok(Some(bearer(&token))),
            _ => Err(BatchClientError::MissingConfigError {
                field: self.variable.clone(),
            }),
        }
    }
}

/// Sends no `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct AnonymousCredentials;

#[async_trait]
impl Credentials for AnonymousCredentials {
    async fn authorization(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A static token wins over a token variable; with neither, requests go out anonymously.
pub fn credentials_from_config(config: &impl ConfigProvider) -> Arc<dyn Credentials> {
    if let Some(token) = config.bearer_token() {
        tracing::debug!("Using static bearer token credentials");
        return Arc::new(BearerTokenCredentials::new(token));
    }
    if let Some(variable) = config.token_env() {
        tracing::debug!("Using bearer token from environment variable {}", variable);
        return Arc::new(EnvTokenCredentials::new(variable));
    }
    tracing::warn!("No credentials configured, requests will be sent without authorization");
    Arc::new(AnonymousCredentials)
}
