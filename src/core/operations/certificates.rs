use crate::core::client::BatchServiceClient;
use crate::domain::models::certificate::{Certificate, CertificateAddParameter, CertificateListResult};
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use reqwest::Method;

pub struct CertificateOperations<'a> {
    client: &'a BatchServiceClient,
}

/// `certificates(thumbprintAlgorithm=sha1,thumbprint=...)`
fn certificate_segment(thumbprint_algorithm: &str, thumbprint: &str) -> Result<String> {
    validate_non_empty_string("thumbprintAlgorithm", thumbprint_algorithm)?;
    validate_non_empty_string("thumbprint", thumbprint)?;
    Ok(format!(
        "certificates(thumbprintAlgorithm={},thumbprint={})",
        thumbprint_algorithm, thumbprint
    ))
}

impl<'a> CertificateOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn add(
        &self,
        certificate: &CertificateAddParameter,
        options: &CertificateAddOptions,
    ) -> Result<ResponseHeaders> {
        certificate.validate()?;
        self.client
            .send_action(Method::POST, &["certificates"], options, Some(certificate))
            .await
    }

    pub async fn list(&self, options: &CertificateListOptions) -> Result<CertificateListResult> {
        self.client.get_json(&["certificates"], options).await
    }

    /// Returns a certificate stuck in `deleteFailed` to `active`.
    pub async fn cancel_deletion(
        &self,
        thumbprint_algorithm: &str,
        thumbprint: &str,
        options: &CertificateCancelDeletionOptions,
    ) -> Result<ResponseHeaders> {
        let segment = certificate_segment(thumbprint_algorithm, thumbprint)?;
        self.client
            .send_empty(Method::POST, &[segment.as_str(), "canceldelete"], options)
            .await
    }

    pub async fn delete(
        &self,
        thumbprint_algorithm: &str,
        thumbprint: &str,
        options: &CertificateDeleteOptions,
    ) -> Result<ResponseHeaders> {
        let segment = certificate_segment(thumbprint_algorithm, thumbprint)?;
        self.client
            .send_empty(Method::DELETE, &[segment.as_str()], options)
            .await
    }

    pub async fn get(
        &self,
        thumbprint_algorithm: &str,
        thumbprint: &str,
        options: &CertificateGetOptions,
    ) -> Result<Certificate> {
        let segment = certificate_segment(thumbprint_algorithm, thumbprint)?;
        self.client.get_json(&[segment.as_str()], options).await
    }
}
