use crate::core::client::BatchServiceClient;
use crate::domain::models::job_schedule::{
    CloudJobSchedule, CloudJobScheduleListResult, JobScheduleAddParameter,
    JobSchedulePatchParameter, JobScheduleUpdateParameter,
};
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Method;

pub struct JobScheduleOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> JobScheduleOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn exists(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleExistsOptions,
    ) -> Result<bool> {
        self.client
            .exists(&["jobschedules", job_schedule_id], options)
            .await
    }

    /// Deletes the schedule together with every job it created.
    pub async fn delete(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleDeleteOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::DELETE, &["jobschedules", job_schedule_id], options)
            .await
    }

    pub async fn get(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleGetOptions,
    ) -> Result<CloudJobSchedule> {
        self.client
            .get_json(&["jobschedules", job_schedule_id], options)
            .await
    }

    pub async fn patch(
        &self,
        job_schedule_id: &str,
        patch: &JobSchedulePatchParameter,
        options: &JobSchedulePatchOptions,
    ) -> Result<ResponseHeaders> {
        patch.validate()?;
        self.client
            .send_action(
                Method::PATCH,
                &["jobschedules", job_schedule_id],
                options,
                Some(patch),
            )
            .await
    }

    pub async fn update(
        &self,
        job_schedule_id: &str,
        update: &JobScheduleUpdateParameter,
        options: &JobScheduleUpdateOptions,
    ) -> Result<ResponseHeaders> {
        update.validate()?;
        self.client
            .send_action(
                Method::PUT,
                &["jobschedules", job_schedule_id],
                options,
                Some(update),
            )
            .await
    }

    pub async fn disable(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleDisableOptions,
    ) -> Result<ResponseHeaders> {
        self.action(job_schedule_id, "disable", options).await
    }

    pub async fn enable(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleEnableOptions,
    ) -> Result<ResponseHeaders> {
        self.action(job_schedule_id, "enable", options).await
    }

    pub async fn terminate(
        &self,
        job_schedule_id: &str,
        options: &JobScheduleTerminateOptions,
    ) -> Result<ResponseHeaders> {
        self.action(job_schedule_id, "terminate", options).await
    }

    pub async fn add(
        &self,
        schedule: &JobScheduleAddParameter,
        options: &JobScheduleAddOptions,
    ) -> Result<ResponseHeaders> {
        schedule.validate()?;
        self.client
            .send_action(Method::POST, &["jobschedules"], options, Some(schedule))
            .await
    }

    pub async fn list(&self, options: &JobScheduleListOptions) -> Result<CloudJobScheduleListResult> {
        self.client.get_json(&["jobschedules"], options).await
    }

    async fn action(
        &self,
        job_schedule_id: &str,
        action: &str,
        options: &WriteOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::POST, &["jobschedules", job_schedule_id, action], options)
            .await
    }
}
