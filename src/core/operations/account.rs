use crate::core::client::BatchServiceClient;
use crate::domain::models::account::{AccountListNodeAgentSkusResult, PoolNodeCountsListResult};
use crate::domain::options::{AccountListNodeAgentSkusOptions, AccountListPoolNodeCountsOptions};
use crate::utils::error::Result;

pub struct AccountOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> AccountOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    /// Node agent SKUs and the images verified against each.
    pub async fn list_node_agent_skus(
        &self,
        options: &AccountListNodeAgentSkusOptions,
    ) -> Result<AccountListNodeAgentSkusResult> {
        self.client.get_json(&["nodeagentskus"], options).await
    }

    /// Node counts per state for every pool in the account.
    pub async fn list_pool_node_counts(
        &self,
        options: &AccountListPoolNodeCountsOptions,
    ) -> Result<PoolNodeCountsListResult> {
        self.client.get_json(&["nodecounts"], options).await
    }
}
