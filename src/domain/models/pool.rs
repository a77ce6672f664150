use super::common::{
    ApplicationPackageReference, CertificateReference, ContainerRegistry, ImageReference,
    MetadataItem, NameValuePair, StartTask, UserAccount,
};
use super::statistics::PoolStatistics;
use super::{PagedList, Timestamp};
use crate::domain::duration::IsoDuration;
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::{
    validate_batch_id, validate_exactly_one, validate_non_empty_string, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

/// Most node ids accepted by a single remove-nodes call.
pub const MAX_NODES_PER_REMOVE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolState {
    Active,
    Deleting,
    Upgrading,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationState {
    Steady,
    Resizing,
    Stopping,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeNodeFillType {
    Spread,
    Pack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolLifetimeOption {
    JobSchedule,
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CachingType {
    None,
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageAccountType {
    #[serde(rename = "standard_lrs")]
    StandardLrs,
    #[serde(rename = "premium_lrs")]
    PremiumLrs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerType {
    DockerCompatible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DynamicVNetAssignmentScope {
    None,
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InboundEndpointProtocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NetworkSecurityGroupRuleAccess {
    Allow,
    Deny,
}

/// What to do with running tasks when nodes leave the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeNodeDeallocationOption {
    Requeue,
    Terminate,
    TaskCompletion,
    RetainedData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudServiceConfiguration {
    pub os_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_automatic_updates: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDisk {
    pub lun: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caching: Option<CachingType>,
    #[serde(rename = "diskSizeGB")]
    pub disk_size_gb: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_account_type: Option<StorageAccountType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfiguration {
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_image_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_registries: Option<Vec<ContainerRegistry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineConfiguration {
    pub image_reference: ImageReference,
    #[serde(rename = "nodeAgentSKUId")]
    pub node_agent_sku_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_configuration: Option<WindowsConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_disks: Option<Vec<DataDisk>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_configuration: Option<ContainerConfiguration>,
}

impl VirtualMachineConfiguration {
    pub fn new(image_reference: ImageReference, node_agent_sku_id: impl Into<String>) -> Self {
        Self {
            image_reference,
            node_agent_sku_id: node_agent_sku_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroupRule {
    pub priority: i32,
    pub access: NetworkSecurityGroupRuleAccess,
    pub source_address_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundNatPool {
    pub name: String,
    pub protocol: InboundEndpointProtocol,
    pub backend_port: i32,
    pub frontend_port_range_start: i32,
    pub frontend_port_range_end: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_security_group_rules: Option<Vec<NetworkSecurityGroupRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEndpointConfiguration {
    #[serde(rename = "inboundNATPools")]
    pub inbound_nat_pools: Vec<InboundNatPool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(
        rename = "dynamicVNetAssignmentScope",
        skip_serializing_if = "Option::is_none"
    )]
    pub dynamic_vnet_assignment_scope: Option<DynamicVNetAssignmentScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_configuration: Option<PoolEndpointConfiguration>,
}

impl Validate for NetworkConfiguration {
    fn validate(&self) -> Result<()> {
        let Some(endpoints) = &self.endpoint_configuration else {
            return Ok(());
        };
        for pool in &endpoints.inbound_nat_pools {
            validate_non_empty_string("inboundNATPools.name", &pool.name)?;
            if pool.frontend_port_range_start > pool.frontend_port_range_end {
                return Err(BatchClientError::validation(format!(
                    "inboundNATPool '{}': frontend port range start {} is after end {}",
                    pool.name, pool.frontend_port_range_start, pool.frontend_port_range_end
                )));
            }
            validate_range("inboundNATPools.backendPort", pool.backend_port, 1, 65535)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSchedulingPolicy {
    pub node_fill_type: ComputeNodeFillType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaleRunError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<NameValuePair>>,
}

/// Outcome of one autoscale formula evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaleRun {
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AutoScaleRunError>,
}

impl AutoScaleRun {
    /// Splits `results` (`$Name=value;$Other=value`) into name/value pairs, `$` stripped.
    pub fn result_values(&self) -> Vec<(String, String)> {
        self.results
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .filter_map(|assignment| {
                let (name, value) = assignment.split_once('=')?;
                let name = name.trim().trim_start_matches('$');
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn result_value(&self, name: &str) -> Option<String> {
        self.result_values()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<NameValuePair>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudPool {
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
    pub state: Option<PoolState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_state: Option<AllocationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_state_transition_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_service_configuration: Option<CloudServiceConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_configuration: Option<VirtualMachineConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_timeout: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_errors: Option<Vec<ResizeError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_low_priority_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_low_priority_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_evaluation_interval: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_run: Option<AutoScaleRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_inter_node_communication: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_licenses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tasks_per_node: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_scheduling_policy: Option<TaskSchedulingPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_accounts: Option<Vec<UserAccount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PoolStatistics>,
}

impl CloudPool {
    /// True while the pool is neither growing nor shrinking.
    pub fn is_steady(&self) -> bool {
        self.allocation_state == Some(AllocationState::Steady)
    }

    pub fn current_nodes(&self) -> i32 {
        self.current_dedicated_nodes.unwrap_or(0) + self.current_low_priority_nodes.unwrap_or(0)
    }
}

/// Body of a pool add request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAddParameter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub vm_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_service_configuration: Option<CloudServiceConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_configuration: Option<VirtualMachineConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_timeout: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_low_priority_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_evaluation_interval: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_inter_node_communication: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_licenses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tasks_per_node: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_scheduling_policy: Option<TaskSchedulingPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_accounts: Option<Vec<UserAccount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl PoolAddParameter {
    pub fn new(id: impl Into<String>, vm_size: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vm_size: vm_size.into(),
            ..Default::default()
        }
    }
}

impl Validate for PoolAddParameter {
    fn validate(&self) -> Result<()> {
        validate_batch_id("pool.id", &self.id)?;
        PoolShape {
            context: "pool",
            vm_size: &self.vm_size,
            cloud_service_configuration: self.cloud_service_configuration.is_some(),
            virtual_machine_configuration: self.virtual_machine_configuration.is_some(),
            enable_auto_scale: self.enable_auto_scale,
            auto_scale_formula: self.auto_scale_formula.as_deref(),
            target_dedicated_nodes: self.target_dedicated_nodes,
            target_low_priority_nodes: self.target_low_priority_nodes,
            max_tasks_per_node: self.max_tasks_per_node,
        }
        .validate()?;
        self.network_configuration.validate()?;
        self.start_task.validate()?;
        self.user_accounts.validate()
    }
}

/// Pool settings for an auto pool; same shape as [`PoolAddParameter`] without the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub vm_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_service_configuration: Option<CloudServiceConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_configuration: Option<VirtualMachineConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tasks_per_node: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_scheduling_policy: Option<TaskSchedulingPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_timeout: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_low_priority_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_evaluation_interval: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_inter_node_communication: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_licenses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_accounts: Option<Vec<UserAccount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl Validate for PoolSpecification {
    fn validate(&self) -> Result<()> {
        PoolShape {
            context: "autoPoolSpecification.pool",
            vm_size: &self.vm_size,
            cloud_service_configuration: self.cloud_service_configuration.is_some(),
            virtual_machine_configuration: self.virtual_machine_configuration.is_some(),
            enable_auto_scale: self.enable_auto_scale,
            auto_scale_formula: self.auto_scale_formula.as_deref(),
            target_dedicated_nodes: self.target_dedicated_nodes,
            target_low_priority_nodes: self.target_low_priority_nodes,
            max_tasks_per_node: self.max_tasks_per_node,
        }
        .validate()?;
        self.network_configuration.validate()?;
        self.start_task.validate()?;
        self.user_accounts.validate()
    }
}

/// Rules shared by explicit pools and auto pool specifications.
struct PoolShape<'a> {
    context: &'a str,
    vm_size: &'a str,
    cloud_service_configuration: bool,
    virtual_machine_configuration: bool,
    enable_auto_scale: Option<bool>,
    auto_scale_formula: Option<&'a str>,
    target_dedicated_nodes: Option<i32>,
    target_low_priority_nodes: Option<i32>,
    max_tasks_per_node: Option<i32>,
}

impl PoolShape<'_> {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string(&format!("{}.vmSize", self.context), self.vm_size)?;
        validate_exactly_one(
            self.context,
            &[
                ("cloudServiceConfiguration", self.cloud_service_configuration),
                ("virtualMachineConfiguration", self.virtual_machine_configuration),
            ],
        )?;

        if self.enable_auto_scale.unwrap_or(false) {
            if self.target_dedicated_nodes.is_some() || self.target_low_priority_nodes.is_some() {
                return Err(BatchClientError::validation(format!(
                    "{}: target node counts must not be set when enableAutoScale is true",
                    self.context
                )));
            }
            if self.auto_scale_formula.map_or(true, |f| f.trim().is_empty()) {
                return Err(BatchClientError::validation(format!(
                    "{}: autoScaleFormula is required when enableAutoScale is true",
                    self.context
                )));
            }
        } else if self.auto_scale_formula.is_some() {
            return Err(BatchClientError::validation(format!(
                "{}: autoScaleFormula requires enableAutoScale to be true",
                self.context
            )));
        }

        for (name, value) in [
            ("targetDedicatedNodes", self.target_dedicated_nodes),
            ("targetLowPriorityNodes", self.target_low_priority_nodes),
        ] {
            if let Some(count) = value {
                validate_range(name, count, 0, i32::MAX)?;
            }
        }
        if let Some(max_tasks) = self.max_tasks_per_node {
            validate_range("maxTasksPerNode", max_tasks, 1, i32::MAX)?;
        }
        Ok(())
    }
}

/// A pool created by the service for a job or job schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPoolSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pool_id_prefix: Option<String>,
    pub pool_lifetime_option: PoolLifetimeOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolSpecification>,
}

impl Validate for AutoPoolSpecification {
    fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.auto_pool_id_prefix {
            // The service appends a GUID, leaving 20 characters for the prefix.
            if prefix.chars().count() > 20 {
                return Err(BatchClientError::validation(format!(
                    "autoPoolIdPrefix '{}' exceeds 20 characters",
                    prefix
                )));
            }
        }
        self.pool.validate()
    }
}

/// Which pool a job runs on: an existing pool id or an auto pool, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pool_specification: Option<AutoPoolSpecification>,
}

impl PoolInformation {
    pub fn existing(pool_id: impl Into<String>) -> Self {
        Self {
            pool_id: Some(pool_id.into()),
            auto_pool_specification: None,
        }
    }

    pub fn auto(specification: AutoPoolSpecification) -> Self {
        Self {
            pool_id: None,
            auto_pool_specification: Some(specification),
        }
    }
}

impl Validate for PoolInformation {
    fn validate(&self) -> Result<()> {
        validate_exactly_one(
            "poolInfo",
            &[
                ("poolId", self.pool_id.is_some()),
                ("autoPoolSpecification", self.auto_pool_specification.is_some()),
            ],
        )?;
        if let Some(pool_id) = &self.pool_id {
            validate_batch_id("poolInfo.poolId", pool_id)?;
        }
        self.auto_pool_specification.validate()
    }
}

/// Pool patch: only the properties present are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPatchParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_package_references: Option<Vec<ApplicationPackageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

impl Validate for PoolPatchParameter {
    fn validate(&self) -> Result<()> {
        self.start_task.validate()
    }
}

/// Full replacement of the updatable pool properties; empty lists clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolUpdatePropertiesParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
    pub certificate_references: Vec<CertificateReference>,
    pub application_package_references: Vec<ApplicationPackageReference>,
    pub metadata: Vec<MetadataItem>,
}

impl Validate for PoolUpdatePropertiesParameter {
    fn validate(&self) -> Result<()> {
        self.start_task.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolEnableAutoScaleParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_evaluation_interval: Option<IsoDuration>,
}

impl Validate for PoolEnableAutoScaleParameter {
    fn validate(&self) -> Result<()> {
        if let Some(interval) = self.auto_scale_evaluation_interval {
            if interval < IsoDuration::from_minutes(5) || interval > IsoDuration::from_hours(168) {
                return Err(BatchClientError::validation(format!(
                    "autoScaleEvaluationInterval {} must be between 5 minutes and 168 hours",
                    interval
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolEvaluateAutoScaleParameter {
    pub auto_scale_formula: String,
}

impl Validate for PoolEvaluateAutoScaleParameter {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("autoScaleFormula", &self.auto_scale_formula)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolResizeParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_low_priority_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_timeout: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_deallocation_option: Option<ComputeNodeDeallocationOption>,
}

impl Validate for PoolResizeParameter {
    fn validate(&self) -> Result<()> {
        if self.target_dedicated_nodes.is_none() && self.target_low_priority_nodes.is_none() {
            return Err(BatchClientError::validation(
                "resize: at least one of targetDedicatedNodes, targetLowPriorityNodes must be set",
            ));
        }
        for (name, value) in [
            ("targetDedicatedNodes", self.target_dedicated_nodes),
            ("targetLowPriorityNodes", self.target_low_priority_nodes),
        ] {
            if let Some(count) = value {
                validate_range(name, count, 0, i32::MAX)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRemoveParameter {
    pub node_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_timeout: Option<IsoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_deallocation_option: Option<ComputeNodeDeallocationOption>,
}

impl Validate for NodeRemoveParameter {
    fn validate(&self) -> Result<()> {
        validate_range("nodeList length", self.node_list.len(), 1, MAX_NODES_PER_REMOVE)?;
        crate::utils::validation::validate_unique_ids(
            "nodeList",
            self.node_list.iter().map(String::as_str),
        )
    }
}

pub type CloudPoolListResult = PagedList<CloudPool>;
