use crate::domain::models::error::BatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Batch service returned {status}{}", format_service_error(.error))]
    ServiceError {
        status: u16,
        error: Option<BatchError>,
        request_id: Option<String>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid header '{name}': {value}")]
    InvalidHeader { name: String, value: String },

    #[error("Invalid ISO 8601 duration '{value}': {reason}")]
    DurationParseError { value: String, reason: String },

    #[error("Paging error: {message}")]
    PagingError { message: String },
}

fn format_service_error(error: &Option<BatchError>) -> String {
    match error {
        Some(e) => format!(": {}", e),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BatchClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ServiceError { .. } | Self::PagingError { .. } => ErrorCategory::Service,
            Self::SerializationError(_)
            | Self::IoError(_)
            | Self::InvalidHeader { .. }
            | Self::DurationParseError { .. } => ErrorCategory::Data,
            Self::UrlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::ServiceError { status, .. } => match *status {
                404 | 409 | 412 => ErrorSeverity::Low,
                408 | 429 | 500..=599 => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            Self::PagingError { .. } => ErrorSeverity::Medium,
            Self::SerializationError(_)
            | Self::InvalidHeader { .. }
            | Self::DurationParseError { .. }
            | Self::ValidationError { .. } => ErrorSeverity::High,
            Self::IoError(_)
            | Self::UrlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// HTTP status of a service error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The service's error code, e.g. `PoolNotFound`.
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Self::ServiceError {
                error: Some(error), ..
            } => error.code.as_deref(),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check network connectivity and the account URL, then retry",
            Self::ServiceError { status, .. } => match *status {
                401 | 403 => "Check that the access token is valid and has access to the account",
                404 => "Check that the resource id exists in the account",
                409 => "The resource is in a conflicting state; wait for it to settle and retry",
                412 => "The resource changed since it was read; re-read it and retry",
                429 | 503 => "The service is throttling requests; retry after a delay",
                _ => "Inspect the service error code and message",
            },
            Self::SerializationError(_) => "The payload did not match the expected wire format",
            Self::IoError(_) => "Check file paths and permissions",
            Self::UrlError(_) => "Check the account URL format",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file or CLI flags",
            Self::MissingConfigError { .. } => "Provide the missing setting in the config file or on the command line",
            Self::ValidationError { .. } => "Fix the request parameters before sending",
            Self::InvalidHeader { .. } => "The service returned a malformed header",
            Self::DurationParseError { .. } => "Use an ISO 8601 duration such as PT1H30M",
            Self::PagingError { .. } => "Restart the listing from the first page",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ServiceError {
                status,
                error: Some(error),
                ..
            } => {
                let code = error.code.as_deref().unwrap_or("Unknown");
                let text = error.message_text().unwrap_or("no message");
                format!("Batch service error {} ({}): {}", code, status, text)
            }
            Self::ServiceError { status, .. } => {
                format!("Batch service error (HTTP {})", status)
            }
            Self::HttpError(_) => "Could not reach the Batch service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::error::ErrorMessage;

    fn service_error(status: u16, code: &str) -> BatchClientError {
        BatchClientError::ServiceError {
            status,
            error: Some(BatchError {
                code: Some(code.to_string()),
                message: Some(ErrorMessage {
                    lang: Some("en-US".to_string()),
                    value: Some("The specified pool does not exist.".to_string()),
                }),
                values: None,
            }),
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn test_service_error_classification() {
        let err = service_error(404, "PoolNotFound");
        assert!(err.is_not_found());
        assert_eq!(err.service_code(), Some("PoolNotFound"));
        assert_eq!(err.category(), ErrorCategory::Service);
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let throttled = service_error(503, "ServerBusy");
        assert_eq!(throttled.severity(), ErrorSeverity::Medium);
        assert!(!throttled.is_not_found());
    }

    #[test]
    fn test_service_error_display() {
        let err = service_error(404, "PoolNotFound");
        assert_eq!(
            err.to_string(),
            "Batch service returned 404: PoolNotFound: The specified pool does not exist."
        );
        assert_eq!(
            err.user_friendly_message(),
            "Batch service error PoolNotFound (404): The specified pool does not exist."
        );

        let bare = BatchClientError::ServiceError {
            status: 500,
            error: None,
            request_id: None,
        };
        assert_eq!(bare.to_string(), "Batch service returned 500");
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = BatchClientError::MissingConfigError {
            field: "account.url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.service_code().is_none());
    }
}
