use super::common::{
    CertificateReference, NameValuePair, StartTask, TaskContainerExecutionInformation,
    TaskExecutionResult, TaskFailureInformation,
};
use super::pool::InboundEndpointProtocol;
use super::task::{TaskExecutionInformation, TaskState};
use super::{PagedList, Timestamp};
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeNodeState {
    Idle,
    Rebooting,
    Reimaging,
    Running,
    Unusable,
    Creating,
    Starting,
    WaitingForStartTask,
    StartTaskFailed,
    LeavingPool,
    Offline,
    Preempted,
    /// Also covers states introduced by later service versions.
    #[serde(other)]
    Unknown,
}

impl ComputeNodeState {
    /// The node can be handed new tasks.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Idle | Self::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchedulingState {
    Enabled,
    Disabled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartTaskState {
    Running,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeNodeRebootOption {
    Requeue,
    Terminate,
    TaskCompletion,
    RetainedData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeNodeReimageOption {
    Requeue,
    Terminate,
    TaskCompletion,
    RetainedData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisableComputeNodeSchedulingOption {
    Requeue,
    Terminate,
    TaskCompletion,
}

/// A task that ran, or is running, on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtask_id: Option<i32>,
    pub task_state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_info: Option<TaskExecutionInformation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTaskInformation {
    pub state: StartTaskState,
    pub start_time: Timestamp,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskExecutionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<Vec<NameValuePair>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEndpoint {
    pub name: String,
    pub protocol: InboundEndpointProtocol,
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: String,
    #[serde(rename = "publicFQDN")]
    pub public_fqdn: String,
    pub frontend_port: i32,
    pub backend_port: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeEndpointConfiguration {
    #[serde(default)]
    pub inbound_endpoints: Vec<InboundEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAgentInformation {
    pub version: String,
    pub last_update_time: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ComputeNodeState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_state: Option<SchedulingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_boot_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tasks_run: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_tasks_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tasks_succeeded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_tasks: Option<Vec<TaskInformation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task_info: Option<StartTaskInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ComputeNodeError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dedicated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_configuration: Option<ComputeNodeEndpointConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_agent_info: Option<NodeAgentInformation>,
}

impl ComputeNode {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    pub fn is_schedulable(&self) -> bool {
        self.scheduling_state != Some(SchedulingState::Disabled)
            && self.state.is_some_and(|state| state.is_available())
    }
}

/// A local user account on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeUser {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
}

impl Validate for ComputeNodeUser {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("user.name", &self.name)?;
        if self.password.is_none() && self.ssh_public_key.is_none() {
            return Err(BatchClientError::validation(format!(
                "user {}: a password or sshPublicKey is required",
                self.name
            )));
        }
        Ok(())
    }
}

/// Replaces the user's password, key and expiry; absent fields are reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdateUserParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRebootParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_reboot_option: Option<ComputeNodeRebootOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReimageParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_reimage_option: Option<ComputeNodeReimageOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDisableSchedulingParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_disable_scheduling_option: Option<DisableComputeNodeSchedulingOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeGetRemoteLoginSettingsResult {
    #[serde(rename = "remoteLoginIPAddress")]
    pub remote_login_ip_address: String,
    pub remote_login_port: i32,
}

/// Where and which window of the node agent's logs to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBatchServiceLogsConfiguration {
    pub container_url: String,
    pub start_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
}

impl Validate for UploadBatchServiceLogsConfiguration {
    fn validate(&self) -> Result<()> {
        validate_url("uploadLogs.containerUrl", &self.container_url)?;
        if let Some(end) = self.end_time {
            if end < self.start_time {
                return Err(BatchClientError::validation(
                    "uploadLogs: endTime is earlier than startTime",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBatchServiceLogsResult {
    pub virtual_directory_name: String,
    pub number_of_files_uploaded: i32,
}

pub type ComputeNodeListResult = PagedList<ComputeNode>;
