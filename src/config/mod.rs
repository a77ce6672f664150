#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::cli::Command;
    use super::toml_config::AccountConfig;
    use crate::core::client::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::{BatchClientError, Result};
    use crate::utils::validation::{validate_url, Validate};
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    /// Command-line settings; flags win over the `--config` file, which wins over defaults.
    #[derive(Debug, Clone, Parser)]
    #[command(name = "batch-cli")]
    #[command(about = "Read-only queries against a batch account")]
    pub struct CliConfig {
        /// TOML file with [account], [auth], [http] and [logging] sections
        #[arg(long)]
        pub config: Option<PathBuf>,

        #[arg(long, env = "BATCH_ACCOUNT_URL")]
        pub account_url: Option<String>,

        /// Bearer token sent as the Authorization header
        #[arg(long)]
        pub token: Option<String>,

        #[arg(long)]
        pub api_version: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,

        #[arg(skip)]
        pub file: Option<AccountConfig>,
    }

    impl CliConfig {
        /// Reads the `--config` file, if one was given.
        pub fn load_file(&mut self) -> Result<()> {
            if let Some(path) = &self.config {
                self.file = Some(AccountConfig::from_file(path)?);
            }
            Ok(())
        }

        pub fn log_level(&self) -> Option<&str> {
            self.file.as_ref().and_then(|f| f.log_level())
        }

        pub fn json_logs(&self) -> bool {
            self.file.as_ref().is_some_and(|f| f.json_logs())
        }
    }

    impl ConfigProvider for CliConfig {
        fn account_url(&self) -> &str {
            self.account_url
                .as_deref()
                .or_else(|| self.file.as_ref().map(|f| f.account_url()))
                .unwrap_or_default()
        }

        fn api_version(&self) -> &str {
            self.api_version
                .as_deref()
                .or_else(|| self.file.as_ref().map(|f| f.api_version()))
                .unwrap_or(DEFAULT_API_VERSION)
        }

        fn timeout(&self) -> Duration {
            self.file
                .as_ref()
                .map(|f| f.timeout())
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        }

        fn user_agent(&self) -> &str {
            self.file
                .as_ref()
                .map(|f| f.user_agent())
                .unwrap_or(DEFAULT_USER_AGENT)
        }

        fn bearer_token(&self) -> Option<&str> {
            self.token
                .as_deref()
                .or_else(|| self.file.as_ref().and_then(|f| f.bearer_token()))
        }

        fn token_env(&self) -> Option<&str> {
            self.file.as_ref().and_then(|f| f.token_env())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(file) = &self.file {
                file.validate()?;
            }
            if self.account_url().is_empty() {
                return Err(BatchClientError::MissingConfigError {
                    field: "account_url".to_string(),
                });
            }
            validate_url("account_url", self.account_url())?;
            if let Some(api_version) = &self.api_version {
                super::toml_config::validate_api_version("api_version", api_version)?;
            }
            Ok(())
        }
    }

}
