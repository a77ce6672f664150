use crate::core::client::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Account settings read from a TOML file.
///
/// ```toml
/// [account]
/// url = "https://myaccount.westus.batch.azure.com"
///
/// [auth]
/// token_env = "BATCH_ACCESS_TOKEN"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub account: AccountSection,
    pub auth: Option<AuthConfig>,
    pub http: Option<HttpConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSection {
    pub url: String,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub bearer_token: Option<String>,
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl AccountConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| BatchClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BatchClientError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("account.url", &self.account.url)?;

        if let Some(api_version) = &self.account.api_version {
            validate_api_version("account.api_version", api_version)?;
        }

        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

/// `YYYY-MM-DD.major.minor`, e.g. `2018-12-01.8.0`.
pub fn validate_api_version(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}\.\d+\.\d+$").map_err(|e| {
        BatchClientError::ConfigError {
            message: e.to_string(),
        }
    })?;
    if !re.is_match(value) {
        return Err(BatchClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected YYYY-MM-DD.major.minor".to_string(),
        });
    }
    Ok(())
}

impl ConfigProvider for AccountConfig {
    fn account_url(&self) -> &str {
        &self.account.url
    }

    fn api_version(&self) -> &str {
        self.account
            .api_version
            .as_deref()
            .unwrap_or(DEFAULT_API_VERSION)
    }

    fn timeout(&self) -> Duration {
        let seconds = self
            .http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(seconds)
    }

    fn user_agent(&self) -> &str {
        self.http
            .as_ref()
            .and_then(|h| h.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn bearer_token(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.bearer_token.as_deref())
    }

    fn token_env(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.token_env.as_deref())
    }
}

impl Validate for AccountConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config() {
        let config = AccountConfig::from_toml_str(
            r#"
[account]
url = "https://acct.westus.batch.azure.com"
"#,
        )
        .unwrap();

        assert_eq!(config.account_url(), "https://acct.westus.batch.azure.com");
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.user_agent().starts_with("batch-rest-client/"));
        assert!(config.bearer_token().is_none());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = AccountConfig::from_toml_str(
            r#"
[account]
url = "https://acct.westus.batch.azure.com"
api_version = "2018-08-01.7.0"

[auth]
token_env = "BATCH_TOKEN"

[http]
timeout_seconds = 15
user_agent = "nightly-sweeper/2.1"

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.api_version(), "2018-08-01.7.0");
        assert_eq!(config.token_env(), Some("BATCH_TOKEN"));
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.user_agent(), "nightly-sweeper/2.1");
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BATCH_CONFIG_TEST_TOKEN", "secret-token");

        let config = AccountConfig::from_toml_str(
            r#"
[account]
url = "https://acct.westus.batch.azure.com"

[auth]
bearer_token = "${BATCH_CONFIG_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.bearer_token(), Some("secret-token"));

        std::env::remove_var("BATCH_CONFIG_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let config = AccountConfig::from_toml_str(
            r#"
[account]
url = "${BATCH_CONFIG_TEST_UNSET_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.account.url, "${BATCH_CONFIG_TEST_UNSET_URL}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_scheme = AccountConfig::from_toml_str(
            r#"
[account]
url = "ftp://acct.westus.batch.azure.com"
"#,
        )
        .unwrap();
        assert!(bad_scheme.validate().is_err());

        let bad_version = AccountConfig::from_toml_str(
            r#"
[account]
url = "https://acct.westus.batch.azure.com"
api_version = "8.0"
"#,
        )
        .unwrap();
        assert!(matches!(
            bad_version.validate(),
            Err(BatchClientError::InvalidConfigValueError { .. })
        ));

        let zero_timeout = AccountConfig::from_toml_str(
            r#"
[account]
url = "https://acct.westus.batch.azure.com"

[http]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_missing_account_section() {
        let err = AccountConfig::from_toml_str("[http]\ntimeout_seconds = 5\n").unwrap_err();
        assert!(matches!(err, BatchClientError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[account]\nurl = \"https://file.eastus.batch.azure.com\"\n")
            .unwrap();

        let config = AccountConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.account_url(), "https://file.eastus.batch.azure.com");
    }
}
