use super::common::{
    ApplicationPackageReference, AuthenticationTokenSettings, ComputeNodeInformation,
    EnvironmentSetting, ExitConditions, OutputFile, ResourceFile, TaskConstraints,
    TaskContainerExecutionInformation, TaskContainerSettings, TaskExecutionResult,
    TaskFailureInformation, UserIdentity,
};
use super::error::BatchError;
use super::statistics::TaskStatistics;
use super::{PagedList, Timestamp};
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{
    validate_batch_id, validate_non_empty_string, validate_range, validate_unique_ids, Validate,
};
use serde::{Deserialize, Serialize};

/// Upper bound on tasks in one add-collection request.
pub const MAX_TASKS_PER_COLLECTION: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    Active,
    Preparing,
    Running,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskAddStatus {
    Success,
    ClientError,
    ServerError,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubtaskState {
    Preparing,
    Running,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityInformation {
    pub affinity_id: String,
}

/// Runs a task on several nodes at once, e.g. for MPI workloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiInstanceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_instances: Option<i32>,
    pub coordination_command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_resource_files: Option<Vec<ResourceFile>>,
}

impl Validate for MultiInstanceSettings {
    fn validate(&self) -> Result<()> {
        if let Some(instances) = self.number_of_instances {
            validate_range("multiInstanceSettings.numberOfInstances", instances, 1, i32::MAX)?;
        }
        validate_non_empty_string(
            "multiInstanceSettings.coordinationCommandLine",
            &self.coordination_command_line,
        )?;
        self.common_resource_files.validate()
    }
}

/// Inclusive range of task ids; both ends are numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdRange {
    pub start: i32,
    pub end: i32,
}

impl TaskIdRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, task_id: &str) -> bool {
        task_id
            .parse::<i32>()
            .map(|id| self.start <= id && id <= self.end)
            .unwrap_or(false)
    }
}

impl Validate for TaskIdRange {
    fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(BatchClientError::validation(format!(
                "taskIdRange: start {} is greater than end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDependencies {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id_ranges: Option<Vec<TaskIdRange>>,
}

impl TaskDependencies {
    pub fn on_tasks<I, S>(task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            task_ids: Some(task_ids.into_iter().map(Into::into).collect()),
            task_id_ranges: None,
        }
    }

    pub fn depends_on(&self, task_id: &str) -> bool {
        let by_id = self
            .task_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id == task_id));
        let by_range = self
            .task_id_ranges
            .as_ref()
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(task_id)));
        by_id || by_range
    }
}

impl Validate for TaskDependencies {
    fn validate(&self) -> Result<()> {
        self.task_id_ranges.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecutionInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_info: Option<TaskContainerExecutionInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_info: Option<TaskFailureInformation>,
    pub retry_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_retry_time: Option<Timestamp>,
    pub requeue_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_requeue_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskExecutionResult>,
}

/// One instance of a multi-instance task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_info: Option<ComputeNodeInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_info: Option<TaskContainerExecutionInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_info: Option<TaskFailureInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubtaskState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<SubtaskState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskExecutionResult>,
}

/// The subtask listing is a single unpaged response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudTaskListSubtasksResult {
    #[serde(default)]
    pub value: Vec<SubtaskInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudTask {
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
    pub exit_conditions: Option<ExitConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<TaskState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_settings: Option<TaskContainerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_files: Option<Vec<OutputFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_info: Option<AffinityInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<TaskConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_identity: Option<UserIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_info: Option<TaskExecutionInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_info: Option<ComputeNodeInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_instance_settings: Option<MultiInstanceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TaskStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<TaskDependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_token_settings: Option<AuthenticationTokenSettings>,
}

impl CloudTask {
    pub fn exit_code(&self) -> Option<i32> {
        self.execution_info.as_ref().and_then(|info| info.exit_code)
    }

    pub fn is_completed(&self) -> bool {
        self.state == Some(TaskState::Completed)
    }

    pub fn failed(&self) -> bool {
        self.execution_info
            .as_ref()
            .is_some_and(|info| info.result == Some(TaskExecutionResult::Failure))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAddParameter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_settings: Option<TaskContainerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_conditions: Option<ExitConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_files: Option<Vec<OutputFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_info: Option<AffinityInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<TaskConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_identity: Option<UserIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_instance_settings: Option<MultiInstanceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<TaskDependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_token_settings: Option<AuthenticationTokenSettings>,
}

impl TaskAddParameter {
    pub fn new(id: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command_line: command_line.into(),
            ..Default::default()
        }
    }
}

impl Validate for TaskAddParameter {
    fn validate(&self) -> Result<()> {
        validate_batch_id("task.id", &self.id)?;
        validate_non_empty_string("task.commandLine", &self.command_line)?;
        self.exit_conditions.validate()?;
        self.resource_files.validate()?;
        self.constraints.validate()?;
        self.user_identity.validate()?;
        self.multi_instance_settings.validate()?;
        self.depends_on.validate()?;
        if let Some(deps) = &self.depends_on {
            if deps.depends_on(&self.id) {
                return Err(BatchClientError::validation(format!(
                    "task {} depends on itself",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAddCollectionParameter {
    pub value: Vec<TaskAddParameter>,
}

impl TaskAddCollectionParameter {
    pub fn new(value: Vec<TaskAddParameter>) -> Self {
        Self { value }
    }
}

impl Validate for TaskAddCollectionParameter {
    fn validate(&self) -> Result<()> {
        validate_range(
            "taskCollection length",
            self.value.len(),
            1,
            MAX_TASKS_PER_COLLECTION,
        )?;
        validate_unique_ids("taskCollection", self.value.iter().map(|t| t.id.as_str()))?;
        self.value.validate()
    }
}

/// Per-task outcome inside an add-collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAddResult {
    pub status: TaskAddStatus,
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAddCollectionResult {
    #[serde(default)]
    pub value: Vec<TaskAddResult>,
}

impl TaskAddCollectionResult {
    /// Results the caller should inspect or resubmit.
    pub fn failures(&self) -> impl Iterator<Item = &TaskAddResult> {
        self.value
            .iter()
            .filter(|r| r.status != TaskAddStatus::Success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Task update replaces the constraints; an absent value resets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<TaskConstraints>,
}

impl Validate for TaskUpdateParameter {
    fn validate(&self) -> Result<()> {
        self.constraints.validate()
    }
}

pub type CloudTaskListResult = PagedList<CloudTask>;
