use crate::core::client::BatchServiceClient;
use crate::domain::models::compute_node::{
    ComputeNode, ComputeNodeGetRemoteLoginSettingsResult, ComputeNodeListResult, ComputeNodeUser,
    NodeDisableSchedulingParameter, NodeRebootParameter, NodeReimageParameter,
    NodeUpdateUserParameter, UploadBatchServiceLogsConfiguration, UploadBatchServiceLogsResult,
};
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use reqwest::Method;

pub struct ComputeNodeOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> ComputeNodeOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn add_user(
        &self,
        pool_id: &str,
        node_id: &str,
        user: &ComputeNodeUser,
        options: &ComputeNodeAddUserOptions,
    ) -> Result<ResponseHeaders> {
        user.validate()?;
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "users"],
                options,
                Some(user),
            )
            .await
    }

    pub async fn delete_user(
        &self,
        pool_id: &str,
        node_id: &str,
        user_name: &str,
        options: &ComputeNodeDeleteUserOptions,
    ) -> Result<ResponseHeaders> {
        validate_non_empty_string("userName", user_name)?;
        self.client
            .send_empty(
                Method::DELETE,
                &["pools", pool_id, "nodes", node_id, "users", user_name],
                options,
            )
            .await
    }

    /// Replaces the user's password, SSH key and expiry.
    pub async fn update_user(
        &self,
        pool_id: &str,
        node_id: &str,
        user_name: &str,
        parameter: &NodeUpdateUserParameter,
        options: &ComputeNodeUpdateUserOptions,
    ) -> Result<ResponseHeaders> {
        validate_non_empty_string("userName", user_name)?;
        self.client
            .send_action(
                Method::PUT,
                &["pools", pool_id, "nodes", node_id, "users", user_name],
                options,
                Some(parameter),
            )
            .await
    }

    pub async fn get(
        &self,
        pool_id: &str,
        node_id: &str,
        options: &ComputeNodeGetOptions,
    ) -> Result<ComputeNode> {
        self.client
            .get_json(&["pools", pool_id, "nodes", node_id], options)
            .await
    }

    pub async fn reboot(
        &self,
        pool_id: &str,
        node_id: &str,
        parameter: &NodeRebootParameter,
        options: &ComputeNodeRebootOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "reboot"],
                options,
                Some(parameter),
            )
            .await
    }

    pub async fn reimage(
        &self,
        pool_id: &str,
        node_id: &str,
        parameter: &NodeReimageParameter,
        options: &ComputeNodeReimageOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "reimage"],
                options,
                Some(parameter),
            )
            .await
    }

    pub async fn disable_scheduling(
        &self,
        pool_id: &str,
        node_id: &str,
        parameter: &NodeDisableSchedulingParameter,
        options: &ComputeNodeDisableSchedulingOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "disablescheduling"],
                options,
                Some(parameter),
            )
            .await
    }

    pub async fn enable_scheduling(
        &self,
        pool_id: &str,
        node_id: &str,
        options: &ComputeNodeEnableSchedulingOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "enablescheduling"],
                options,
            )
            .await
    }

    pub async fn get_remote_login_settings(
        &self,
        pool_id: &str,
        node_id: &str,
        options: &ComputeNodeGetRemoteLoginSettingsOptions,
    ) -> Result<ComputeNodeGetRemoteLoginSettingsResult> {
        self.client
            .get_json(
                &["pools", pool_id, "nodes", node_id, "remoteloginsettings"],
                options,
            )
            .await
    }

    /// Raw `.rdp` file for nodes of cloud service configuration pools.
    pub async fn get_remote_desktop(
        &self,
        pool_id: &str,
        node_id: &str,
        options: &ComputeNodeGetRemoteDesktopOptions,
    ) -> Result<Vec<u8>> {
        let (_, bytes) = self
            .client
            .get_bytes(&["pools", pool_id, "nodes", node_id, "rdp"], options)
            .await?;
        Ok(bytes)
    }

    pub async fn upload_batch_service_logs(
        &self,
        pool_id: &str,
        node_id: &str,
        configuration: &UploadBatchServiceLogsConfiguration,
        options: &ComputeNodeUploadBatchServiceLogsOptions,
    ) -> Result<UploadBatchServiceLogsResult> {
        configuration.validate()?;
        self.client
            .send_json(
                Method::POST,
                &["pools", pool_id, "nodes", node_id, "uploadbatchservicelogs"],
                options,
                configuration,
            )
            .await
    }

    pub async fn list(
        &self,
        pool_id: &str,
        options: &ComputeNodeListOptions,
    ) -> Result<ComputeNodeListResult> {
        self.client
            .get_json(&["pools", pool_id, "nodes"], options)
            .await
    }
}
