use serde::{Deserialize, Serialize};
use std::fmt;

/// Localized error text as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Body of every non-success response from the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ErrorMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<BatchErrorDetail>>,
}

impl BatchError {
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.value.as_deref())
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.values
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|d| d.key.as_deref() == Some(key))
            .and_then(|d| d.value.as_deref())
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.as_deref().unwrap_or("Unknown");
        match self.message_text() {
            Some(text) => write!(f, "{}: {}", code, text),
            None => f.write_str(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_error_body() {
        let body = r#"{
            "odata.metadata": "https://acct.westus.batch.azure.com/$metadata#Microsoft.Azure.Batch.Protocol.Entities.Container.errors/@Element",
            "code": "JobNotFound",
            "message": {
                "lang": "en-US",
                "value": "The specified job does not exist.\nRequestId:0c4f\nTime:2024-03-01T10:00:00.0000000Z"
            },
            "values": [
                {"key": "Reason", "value": "The job was deleted"}
            ]
        }"#;

        let error: BatchError = serde_json::from_str(body).unwrap();
        assert_eq!(error.code.as_deref(), Some("JobNotFound"));
        assert!(error.message_text().unwrap().starts_with("The specified job"));
        assert_eq!(error.detail("Reason"), Some("The job was deleted"));
        assert_eq!(error.detail("Missing"), None);
    }

    #[test]
    fn test_display_without_message() {
        let error = BatchError {
            code: Some("ServerBusy".to_string()),
            ..Default::default()
        };
        assert_eq!(error.to_string(), "ServerBusy");
        assert_eq!(BatchError::default().to_string(), "Unknown");
    }
}
