use crate::core::client::BatchServiceClient;
use crate::domain::models::account::{ApplicationListResult, ApplicationSummary};
use crate::domain::options::{ApplicationGetOptions, ApplicationListOptions};
use crate::utils::error::Result;

/// Application packages available to the account.
pub struct ApplicationOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> ApplicationOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: &ApplicationListOptions) -> Result<ApplicationListResult> {
        self.client.get_json(&["applications"], options).await
    }

    pub async fn get(
        &self,
        application_id: &str,
        options: &ApplicationGetOptions,
    ) -> Result<ApplicationSummary> {
        self.client
            .get_json(&["applications", application_id], options)
            .await
    }
}
