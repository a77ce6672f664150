use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Supplies the `Authorization` header for each request.
///
/// `Ok(None)` sends the request unauthenticated.
#[async_trait]
pub trait Credentials: Send + Sync {
    async fn authorization(&self) -> Result<Option<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn account_url(&self) -> &str;
    fn api_version(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn bearer_token(&self) -> Option<&str>;

    /// Environment variable read for a token on every request.
    fn token_env(&self) -> Option<&str> {
        None
    }
}
