//! Records shared by pools, jobs, tasks and compute nodes.

use crate::domain::duration::IsoDuration;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_exactly_one, validate_non_empty_string, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerWorkingDirectory {
    TaskWorkingDirectory,
    ContainerImageDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoUserScope {
    Task,
    Pool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElevationLevel {
    NonAdmin,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginMode {
    Batch,
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFileUploadCondition {
    TaskSuccess,
    TaskFailure,
    TaskCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessScope {
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificateStoreLocation {
    CurrentUser,
    LocalMachine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificateVisibility {
    StartTask,
    Task,
    RemoteUser,
}

/// What happens to the job when a task exits with a matching condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobAction {
    None,
    Disable,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyAction {
    Satisfy,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    UserError,
    ServerError,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskExecutionResult {
    Success,
    Failure,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Arbitrary caller-owned name/value pair; the service stores it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSetting {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl EnvironmentSetting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A file to download onto the node before a task runs.
///
/// Exactly one of `auto_storage_container_name`, `storage_container_url` and
/// `http_url` names the source. `blob_prefix` filters container sources only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_storage_container_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_container_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_mode: Option<String>,
}

impl ResourceFile {
    pub fn from_http_url(http_url: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            http_url: Some(http_url.into()),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }

    pub fn from_storage_container(container_url: impl Into<String>) -> Self {
        Self {
            storage_container_url: Some(container_url.into()),
            ..Default::default()
        }
    }
}

impl Validate for ResourceFile {
    fn validate(&self) -> Result<()> {
        validate_exactly_one(
            "resourceFile",
            &[
                ("autoStorageContainerName", self.auto_storage_container_name.is_some()),
                ("storageContainerUrl", self.storage_container_url.is_some()),
                ("httpUrl", self.http_url.is_some()),
            ],
        )?;
        if self.blob_prefix.is_some() && self.http_url.is_some() {
            return Err(crate::utils::error::BatchClientError::validation(
                "resourceFile: blobPrefix applies only to container sources",
            ));
        }
        if self.http_url.is_some() && self.file_path.is_none() {
            return Err(crate::utils::error::BatchClientError::validation(
                "resourceFile: filePath is required when httpUrl is set",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPackageReference {
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateReference {
    pub thumbprint: String,
    pub thumbprint_algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_location: Option<CertificateStoreLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<CertificateVisibility>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRegistry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_server: Option<String>,
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContainerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_run_options: Option<String>,
    pub image_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<ContainerRegistry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<ContainerWorkingDirectory>,
}

/// A marketplace image or a custom image id; custom images set only `virtual_machine_image_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_image_id: Option<String>,
}

impl ImageReference {
    pub fn marketplace(
        publisher: impl Into<String>,
        offer: impl Into<String>,
        sku: impl Into<String>,
    ) -> Self {
        Self {
            publisher: Some(publisher.into()),
            offer: Some(offer.into()),
            sku: Some(sku.into()),
            version: Some("latest".to_string()),
            virtual_machine_image_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoUserSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<AutoUserScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_level: Option<ElevationLevel>,
}

/// Either a named user account on the node or an auto-user, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_user: Option<AutoUserSpecification>,
}

impl UserIdentity {
    pub fn admin_pool_user() -> Self {
        Self {
            user_name: None,
            auto_user: Some(AutoUserSpecification {
                scope: Some(AutoUserScope::Pool),
                elevation_level: Some(ElevationLevel::Admin),
            }),
        }
    }
}

impl Validate for UserIdentity {
    fn validate(&self) -> Result<()> {
        if self.user_name.is_some() && self.auto_user.is_some() {
            return Err(crate::utils::error::BatchClientError::validation(
                "userIdentity: userName and autoUser are mutually exclusive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxUserConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_private_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsUserConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_mode: Option<LoginMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_level: Option<ElevationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_user_configuration: Option<LinuxUserConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_user_configuration: Option<WindowsUserConfiguration>,
}

impl Validate for UserAccount {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("userAccount.name", &self.name)?;
        if let Some(linux) = &self.linux_user_configuration {
            if linux.uid.is_some() != linux.gid.is_some() {
                return Err(crate::utils::error::BatchClientError::validation(
                    "linuxUserConfiguration: uid and gid must be specified together",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileBlobContainerDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub container_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFileDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<OutputFileBlobContainerDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileUploadOptions {
    pub upload_condition: OutputFileUploadCondition,
}

/// Files uploaded from the node after the task process exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub file_pattern: String,
    pub destination: OutputFileDestination,
    pub upload_options: OutputFileUploadOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationTokenSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Vec<AccessScope>>,
}

/// Runs on each node as it joins the pool or restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTask {
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_settings: Option<TaskContainerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_identity: Option<UserIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_task_retry_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_success: Option<bool>,
}

impl StartTask {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            ..Default::default()
        }
    }
}

impl Validate for StartTask {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("startTask.commandLine", &self.command_line)?;
        validate_retry_count("startTask.maxTaskRetryCount", self.max_task_retry_count)?;
        self.resource_files.validate()?;
        self.user_identity.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_action: Option<JobAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_action: Option<DependencyAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitCodeMapping {
    pub code: i32,
    pub exit_options: ExitOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitCodeRangeMapping {
    pub start: i32,
    pub end: i32,
    pub exit_options: ExitOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_codes: Option<Vec<ExitCodeMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code_ranges: Option<Vec<ExitCodeRangeMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_processing_error: Option<ExitOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_upload_error: Option<ExitOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ExitOptions>,
}

impl Validate for ExitConditions {
    fn validate(&self) -> Result<()> {
        for range in self.exit_code_ranges.as_deref().unwrap_or_default() {
            if range.start > range.end {
                return Err(crate::utils::error::BatchClientError::validation(format!(
                    "exitCodeRanges: start {} is greater than end {}",
                    range.start, range.end
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wall_clock_time: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_time: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_task_retry_count: Option<i32>,
}

impl Validate for TaskConstraints {
    fn validate(&self) -> Result<()> {
        validate_retry_count("constraints.maxTaskRetryCount", self.max_task_retry_count)
    }
}

/// -1 means retry without limit.
pub(crate) fn validate_retry_count(field_name: &str, count: Option<i32>) -> Result<()> {
    match count {
        Some(count) => validate_range(field_name, count, -1, i32::MAX),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContainerExecutionInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFailureInformation {
    pub category: ErrorCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<NameValuePair>>,
}

/// Where a task ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_root_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_root_directory_url: Option<String>,
}
