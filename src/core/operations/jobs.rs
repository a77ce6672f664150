use crate::core::client::BatchServiceClient;
use crate::domain::models::job::{
    CloudJob, CloudJobListPreparationAndReleaseTaskStatusResult, CloudJobListResult,
    JobAddParameter, JobDisableParameter, JobPatchParameter, JobTerminateParameter,
    JobUpdateParameter, TaskCounts,
};
use crate::domain::models::statistics::JobStatistics;
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Method;

pub struct JobOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> JobOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn get_all_lifetime_statistics(
        &self,
        options: &JobGetAllLifetimeStatisticsOptions,
    ) -> Result<JobStatistics> {
        self.client.get_json(&["lifetimejobstats"], options).await
    }

    pub async fn delete(&self, job_id: &str, options: &JobDeleteOptions) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::DELETE, &["jobs", job_id], options)
            .await
    }

    pub async fn get(&self, job_id: &str, options: &JobGetOptions) -> Result<CloudJob> {
        self.client.get_json(&["jobs", job_id], options).await
    }

    pub async fn patch(
        &self,
        job_id: &str,
        patch: &JobPatchParameter,
        options: &JobPatchOptions,
    ) -> Result<ResponseHeaders> {
        patch.validate()?;
        self.client
            .send_action(Method::PATCH, &["jobs", job_id], options, Some(patch))
            .await
    }

    /// Full replacement: properties missing from `update` revert to defaults.
    pub async fn update(
        &self,
        job_id: &str,
        update: &JobUpdateParameter,
        options: &JobUpdateOptions,
    ) -> Result<ResponseHeaders> {
        update.validate()?;
        self.client
            .send_action(Method::PUT, &["jobs", job_id], options, Some(update))
            .await
    }

    pub async fn disable(
        &self,
        job_id: &str,
        parameter: &JobDisableParameter,
        options: &JobDisableOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_action(Method::POST, &["jobs", job_id, "disable"], options, Some(parameter))
            .await
    }

    pub async fn enable(&self, job_id: &str, options: &JobEnableOptions) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::POST, &["jobs", job_id, "enable"], options)
            .await
    }

    pub async fn terminate(
        &self,
        job_id: &str,
        parameter: &JobTerminateParameter,
        options: &JobTerminateOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_action(Method::POST, &["jobs", job_id, "terminate"], options, Some(parameter))
            .await
    }

    pub async fn add(&self, job: &JobAddParameter, options: &JobAddOptions) -> Result<ResponseHeaders> {
        job.validate()?;
        self.client
            .send_action(Method::POST, &["jobs"], options, Some(job))
            .await
    }

    pub async fn list(&self, options: &JobListOptions) -> Result<CloudJobListResult> {
        self.client.get_json(&["jobs"], options).await
    }

    /// Jobs created by one job schedule.
    pub async fn list_from_job_schedule(
        &self,
        job_schedule_id: &str,
        options: &JobListFromJobScheduleOptions,
    ) -> Result<CloudJobListResult> {
        self.client
            .get_json(&["jobschedules", job_schedule_id, "jobs"], options)
            .await
    }

    pub async fn list_preparation_and_release_task_status(
        &self,
        job_id: &str,
        options: &JobListPreparationAndReleaseTaskStatusOptions,
    ) -> Result<CloudJobListPreparationAndReleaseTaskStatusResult> {
        self.client
            .get_json(
                &["jobs", job_id, "jobpreparationandreleasetaskstatus"],
                options,
            )
            .await
    }

    pub async fn get_task_counts(
        &self,
        job_id: &str,
        options: &JobGetTaskCountsOptions,
    ) -> Result<TaskCounts> {
        self.client
            .get_json(&["jobs", job_id, "taskcounts"], options)
            .await
    }
}
