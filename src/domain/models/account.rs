//! Account-level listings: node agent SKUs, per-pool node counts,
//! application packages and usage metrics.

use super::common::ImageReference;
use super::{PagedList, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OsType {
    Linux,
    Windows,
    #[serde(other)]
    Unknown,
}

/// A node agent build and the marketplace images verified against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAgentSku {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_image_references: Option<Vec<ImageReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsType>,
}

impl NodeAgentSku {
    pub fn supports(&self, publisher: &str, offer: &str) -> bool {
        self.verified_image_references.as_ref().is_some_and(|images| {
            images.iter().any(|image| {
                image.publisher.as_deref() == Some(publisher) && image.offer.as_deref() == Some(offer)
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCounts {
    pub creating: i32,
    pub idle: i32,
    pub offline: i32,
    pub preempted: i32,
    pub rebooting: i32,
    pub reimaging: i32,
    pub running: i32,
    pub starting: i32,
    pub start_task_failed: i32,
    pub leaving_pool: i32,
    pub unknown: i32,
    pub unusable: i32,
    pub waiting_for_start_task: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolNodeCounts {
    pub pool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedicated: Option<NodeCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_priority: Option<NodeCounts>,
}

impl PoolNodeCounts {
    pub fn total(&self) -> i32 {
        self.dedicated.as_ref().map_or(0, |c| c.total)
            + self.low_priority.as_ref().map_or(0, |c| c.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// Core hours a pool consumed in one aggregation interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolUsageMetrics {
    pub pool_id: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub vm_size: String,
    pub total_core_hours: f64,
}

pub type AccountListNodeAgentSkusResult = PagedList<NodeAgentSku>;
pub type PoolNodeCountsListResult = PagedList<PoolNodeCounts>;
pub type ApplicationListResult = PagedList<ApplicationSummary>;
pub type PoolListUsageMetricsResult = PagedList<PoolUsageMetrics>;
