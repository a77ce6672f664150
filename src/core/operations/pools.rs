use crate::core::client::BatchServiceClient;
use crate::domain::models::account::PoolListUsageMetricsResult;
use crate::domain::models::pool::{
    AutoScaleRun, CloudPool, CloudPoolListResult, NodeRemoveParameter, PoolAddParameter,
    PoolEnableAutoScaleParameter, PoolEvaluateAutoScaleParameter, PoolPatchParameter,
    PoolResizeParameter, PoolUpdatePropertiesParameter,
};
use crate::domain::models::statistics::PoolStatistics;
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Method;

pub struct PoolOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> PoolOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    /// Core-hour usage aggregated in 30 minute intervals.
    pub async fn list_usage_metrics(
        &self,
        options: &PoolListUsageMetricsOptions,
    ) -> Result<PoolListUsageMetricsResult> {
        self.client.get_json(&["poolusagemetrics"], options).await
    }

    pub async fn get_all_lifetime_statistics(
        &self,
        options: &PoolGetAllLifetimeStatisticsOptions,
    ) -> Result<PoolStatistics> {
        self.client.get_json(&["lifetimepoolstats"], options).await
    }

    pub async fn add(
        &self,
        pool: &PoolAddParameter,
        options: &PoolAddOptions,
    ) -> Result<ResponseHeaders> {
        pool.validate()?;
        self.client
            .send_action(Method::POST, &["pools"], options, Some(pool))
            .await
    }

    pub async fn list(&self, options: &PoolListOptions) -> Result<CloudPoolListResult> {
        self.client.get_json(&["pools"], options).await
    }

    pub async fn delete(&self, pool_id: &str, options: &PoolDeleteOptions) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::DELETE, &["pools", pool_id], options)
            .await
    }

    pub async fn exists(&self, pool_id: &str, options: &PoolExistsOptions) -> Result<bool> {
        self.client.exists(&["pools", pool_id], options).await
    }

    pub async fn get(&self, pool_id: &str, options: &PoolGetOptions) -> Result<CloudPool> {
        self.client.get_json(&["pools", pool_id], options).await
    }

    /// Replaces only the properties present in `patch`.
    pub async fn patch(
        &self,
        pool_id: &str,
        patch: &PoolPatchParameter,
        options: &PoolPatchOptions,
    ) -> Result<ResponseHeaders> {
        patch.validate()?;
        self.client
            .send_action(Method::PATCH, &["pools", pool_id], options, Some(patch))
            .await
    }

    pub async fn disable_auto_scale(
        &self,
        pool_id: &str,
        options: &PoolDisableAutoScaleOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::POST, &["pools", pool_id, "disableautoscale"], options)
            .await
    }

    pub async fn enable_auto_scale(
        &self,
        pool_id: &str,
        parameter: &PoolEnableAutoScaleParameter,
        options: &PoolEnableAutoScaleOptions,
    ) -> Result<ResponseHeaders> {
        parameter.validate()?;
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "enableautoscale"],
                options,
                Some(parameter),
            )
            .await
    }

    /// Evaluates a formula against the pool without applying it.
    pub async fn evaluate_auto_scale(
        &self,
        pool_id: &str,
        parameter: &PoolEvaluateAutoScaleParameter,
        options: &PoolEvaluateAutoScaleOptions,
    ) -> Result<AutoScaleRun> {
        parameter.validate()?;
        self.client
            .send_json(
                Method::POST,
                &["pools", pool_id, "evaluateautoscale"],
                options,
                parameter,
            )
            .await
    }

    pub async fn resize(
        &self,
        pool_id: &str,
        parameter: &PoolResizeParameter,
        options: &PoolResizeOptions,
    ) -> Result<ResponseHeaders> {
        parameter.validate()?;
        self.client
            .send_action(Method::POST, &["pools", pool_id, "resize"], options, Some(parameter))
            .await
    }

    pub async fn stop_resize(
        &self,
        pool_id: &str,
        options: &PoolStopResizeOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::POST, &["pools", pool_id, "stopresize"], options)
            .await
    }

    /// Replaces the start task, certificates, packages and metadata wholesale.
    pub async fn update_properties(
        &self,
        pool_id: &str,
        parameter: &PoolUpdatePropertiesParameter,
        options: &PoolUpdatePropertiesOptions,
    ) -> Result<ResponseHeaders> {
        parameter.validate()?;
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "updateproperties"],
                options,
                Some(parameter),
            )
            .await
    }

    pub async fn remove_nodes(
        &self,
        pool_id: &str,
        parameter: &NodeRemoveParameter,
        options: &PoolRemoveNodesOptions,
    ) -> Result<ResponseHeaders> {
        parameter.validate()?;
        self.client
            .send_action(
                Method::POST,
                &["pools", pool_id, "removenodes"],
                options,
                Some(parameter),
            )
            .await
    }
}
