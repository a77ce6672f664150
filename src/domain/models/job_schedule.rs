use super::common::{EnvironmentSetting, MetadataItem};
use super::job::{
    JobConstraints, JobManagerTask, JobNetworkConfiguration, JobPreparationTask, JobReleaseTask,
    OnAllTasksComplete, OnTaskFailure, MAX_JOB_PRIORITY, MIN_JOB_PRIORITY,
};
use super::pool::PoolInformation;
use super::statistics::JobScheduleStatistics;
use super::{PagedList, Timestamp};
use crate::domain::duration::IsoDuration;
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{validate_batch_id, validate_range, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobScheduleState {
    Active,
    Completed,
    Disabled,
    Terminating,
    Deleting,
    #[serde(other)]
    Unknown,
}

/// When and how often the service creates jobs for a schedule.
///
/// With no `recurrence_interval` the schedule creates a single job as soon
/// as `do_not_run_until` (or now) is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_run_until: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_run_after: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_window: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_interval: Option<IsoDuration>,
}

impl Schedule {
    pub fn every(interval: IsoDuration) -> Self {
        Self {
            recurrence_interval: Some(interval),
            ..Default::default()
        }
    }
}

impl Validate for Schedule {
    fn validate(&self) -> Result<()> {
        if let (Some(until), Some(after)) = (self.do_not_run_until, self.do_not_run_after) {
            if after < until {
                return Err(BatchClientError::validation(format!(
                    "schedule: doNotRunAfter {} is earlier than doNotRunUntil {}",
                    after.to_rfc3339(),
                    until.to_rfc3339()
                )));
            }
        }
        if let Some(interval) = self.recurrence_interval {
            if interval < IsoDuration::from_minutes(1) {
                return Err(BatchClientError::validation(format!(
                    "schedule.recurrenceInterval {} is shorter than one minute",
                    interval
                )));
            }
        }
        if let Some(window) = self.start_window {
            if window < IsoDuration::from_minutes(1) {
                return Err(BatchClientError::validation(format!(
                    "schedule.startWindow {} is shorter than one minute",
                    window
                )));
            }
        }
        Ok(())
    }
}

/// Template for the jobs a schedule creates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_task_dependencies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_all_tasks_complete: Option<OnAllTasksComplete>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_task_failure: Option<OnTaskFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<JobNetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<JobConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_manager_task: Option<JobManagerTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_preparation_task: Option<JobPreparationTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_release_task: Option<JobReleaseTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_environment_settings: Option<Vec<EnvironmentSetting>>,
    pub pool_info: PoolInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl JobSpecification {
    pub fn new(pool_info: PoolInformation) -> Self {
        Self {
            pool_info,
            ..Default::default()
        }
    }
}

impl Validate for JobSpecification {
    fn validate(&self) -> Result<()> {
        if let Some(priority) = self.priority {
            validate_range(
                "jobSpecification.priority",
                priority,
                MIN_JOB_PRIORITY,
                MAX_JOB_PRIORITY,
            )?;
        }
        self.pool_info.validate()?;
        self.constraints.validate()?;
        self.job_manager_task.validate()?;
        self.job_preparation_task.validate()?;
        self.job_release_task.validate()?;
        if self.job_release_task.is_some() && self.job_preparation_task.is_none() {
            return Err(BatchClientError::validation(
                "jobSpecification: a jobReleaseTask requires a jobPreparationTask",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleExecutionInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_job: Option<RecentJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudJobSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<JobScheduleState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<JobScheduleState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_specification: Option<JobSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_info: Option<JobScheduleExecutionInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<JobScheduleStatistics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleAddParameter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub schedule: Schedule,
    pub job_specification: JobSpecification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl JobScheduleAddParameter {
    pub fn new(
        id: impl Into<String>,
        schedule: Schedule,
        job_specification: JobSpecification,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            schedule,
            job_specification,
            metadata: None,
        }
    }
}

impl Validate for JobScheduleAddParameter {
    fn validate(&self) -> Result<()> {
        validate_batch_id("jobSchedule.id", &self.id)?;
        self.schedule.validate()?;
        self.job_specification.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSchedulePatchParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_specification: Option<JobSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl Validate for JobSchedulePatchParameter {
    fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        self.job_specification.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleUpdateParameter {
    pub schedule: Schedule,
    pub job_specification: JobSpecification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl Validate for JobScheduleUpdateParameter {
    fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        self.job_specification.validate()
    }
}

pub type CloudJobScheduleListResult = PagedList<CloudJobSchedule>;
