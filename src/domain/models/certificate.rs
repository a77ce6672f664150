use super::common::NameValuePair;
use super::{PagedList, Timestamp};
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificateState {
    Active,
    Deleting,
    DeleteFailed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificateFormat {
    Pfx,
    Cer,
}

/// Why the last delete attempt left the certificate in `deleteFailed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCertificateError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<NameValuePair>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CertificateState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<CertificateState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_certificate_error: Option<DeleteCertificateError>,
}

/// `data` is the base64 encoded certificate; `password` applies to PFX only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAddParameter {
    pub thumbprint: String,
    pub thumbprint_algorithm: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_format: Option<CertificateFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CertificateAddParameter {
    pub fn sha1(thumbprint: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            thumbprint: thumbprint.into(),
            thumbprint_algorithm: "sha1".to_string(),
            data: data.into(),
            certificate_format: None,
            password: None,
        }
    }
}

impl Validate for CertificateAddParameter {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("certificate.thumbprint", &self.thumbprint)?;
        if !self.thumbprint.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BatchClientError::validation(format!(
                "certificate.thumbprint '{}' must be hexadecimal",
                self.thumbprint
            )));
        }
        validate_non_empty_string("certificate.thumbprintAlgorithm", &self.thumbprint_algorithm)?;
        validate_non_empty_string("certificate.data", &self.data)?;

        let is_cer = self.certificate_format == Some(CertificateFormat::Cer);
        if is_cer && self.password.is_some() {
            return Err(BatchClientError::validation(
                "certificate.password must be omitted for the cer format",
            ));
        }
        if !is_cer && self.password.is_none() {
            return Err(BatchClientError::validation(
                "certificate.password is required for the pfx format",
            ));
        }
        Ok(())
    }
}

pub type CertificateListResult = PagedList<Certificate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_add_wire_shape() {
        let add = CertificateAddParameter {
            certificate_format: Some(CertificateFormat::Pfx),
            password: Some("secret".to_string()),
            ..CertificateAddParameter::sha1("0123456789abcdef0123456789abcdef01234567", "MIIKQgIBAzCC")
        };
        assert!(add.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&add).unwrap(),
            serde_json::json!({
                "thumbprint": "0123456789abcdef0123456789abcdef01234567",
                "thumbprintAlgorithm": "sha1",
                "data": "MIIKQgIBAzCC",
                "certificateFormat": "pfx",
                "password": "secret"
            })
        );
    }

    #[test]
    fn test_certificate_password_rules() {
        let pfx_without_password = CertificateAddParameter::sha1("abcdef", "MIIK");
        assert!(pfx_without_password.validate().is_err());

        let cer_with_password = CertificateAddParameter {
            certificate_format: Some(CertificateFormat::Cer),
            password: Some("secret".to_string()),
            ..CertificateAddParameter::sha1("abcdef", "MIIK")
        };
        assert!(cer_with_password.validate().is_err());

        let not_hex = CertificateAddParameter {
            certificate_format: Some(CertificateFormat::Cer),
            ..CertificateAddParameter::sha1("xyz", "MIIK")
        };
        assert!(not_hex.validate().is_err());
    }

    #[test]
    fn test_certificate_delete_failed_payload() {
        let json = r#"{
            "thumbprint": "abcdef",
            "thumbprintAlgorithm": "sha1",
            "state": "deleteFailed",
            "previousState": "deleting",
            "deleteCertificateError": {
                "code": "CertificateBeingUsed",
                "message": "The certificate is referenced by pools",
                "values": [{"name": "Pools", "value": "p1;p2"}]
            }
        }"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.state, Some(CertificateState::DeleteFailed));
        let error = cert.delete_certificate_error.unwrap();
        assert_eq!(error.code.as_deref(), Some("CertificateBeingUsed"));
        assert_eq!(error.values.unwrap()[0].value.as_deref(), Some("p1;p2"));
    }
}
