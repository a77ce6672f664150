//! Lifetime and per-resource statistics snapshots.
//!
//! The service refreshes these roughly every 30 minutes, so
//! `last_update_time` can trail the resource's real state.

use super::Timestamp;
use crate::domain::duration::IsoDuration;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatistics {
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    pub dedicated_core_time: IsoDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatistics {
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    #[serde(rename = "avgCPUPercentage")]
    pub avg_cpu_percentage: f64,
    #[serde(rename = "avgMemoryGiB")]
    pub avg_memory_gib: f64,
    #[serde(rename = "peakMemoryGiB")]
    pub peak_memory_gib: f64,
    #[serde(rename = "avgDiskGiB")]
    pub avg_disk_gib: f64,
    #[serde(rename = "peakDiskGiB")]
    pub peak_disk_gib: f64,
    #[serde(rename = "diskReadIOps")]
    pub disk_read_iops: i64,
    #[serde(rename = "diskWriteIOps")]
    pub disk_write_iops: i64,
    #[serde(rename = "diskReadGiB")]
    pub disk_read_gib: f64,
    #[serde(rename = "diskWriteGiB")]
    pub disk_write_gib: f64,
    #[serde(rename = "networkReadGiB")]
    pub network_read_gib: f64,
    #[serde(rename = "networkWriteGiB")]
    pub network_write_gib: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
    pub url: String,
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_stats: Option<UsageStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_stats: Option<ResourceStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    pub url: String,
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    #[serde(rename = "userCPUTime")]
    pub user_cpu_time: IsoDuration,
    #[serde(rename = "kernelCPUTime")]
    pub kernel_cpu_time: IsoDuration,
    pub wall_clock_time: IsoDuration,
    #[serde(rename = "readIOps")]
    pub read_iops: i64,
    #[serde(rename = "writeIOps")]
    pub write_iops: i64,
    #[serde(rename = "readIOGiB")]
    pub read_io_gib: f64,
    #[serde(rename = "writeIOGiB")]
    pub write_io_gib: f64,
    pub num_succeeded_tasks: i64,
    pub num_failed_tasks: i64,
    pub num_task_retries: i64,
    pub wait_time: IsoDuration,
}

impl JobStatistics {
    pub fn total_cpu_time(&self) -> Duration {
        self.user_cpu_time.as_duration() + self.kernel_cpu_time.as_duration()
    }

    pub fn finished_tasks(&self) -> i64 {
        self.num_succeeded_tasks + self.num_failed_tasks
    }
}

/// Same counters as [`JobStatistics`], aggregated over every job the schedule created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleStatistics {
    pub url: String,
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    #[serde(rename = "userCPUTime")]
    pub user_cpu_time: IsoDuration,
    #[serde(rename = "kernelCPUTime")]
    pub kernel_cpu_time: IsoDuration,
    pub wall_clock_time: IsoDuration,
    #[serde(rename = "readIOps")]
    pub read_iops: i64,
    #[serde(rename = "writeIOps")]
    pub write_iops: i64,
    #[serde(rename = "readIOGiB")]
    pub read_io_gib: f64,
    #[serde(rename = "writeIOGiB")]
    pub write_io_gib: f64,
    pub num_succeeded_tasks: i64,
    pub num_failed_tasks: i64,
    pub num_task_retries: i64,
    pub wait_time: IsoDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub url: String,
    pub start_time: Timestamp,
    pub last_update_time: Timestamp,
    #[serde(rename = "userCPUTime")]
    pub user_cpu_time: IsoDuration,
    #[serde(rename = "kernelCPUTime")]
    pub kernel_cpu_time: IsoDuration,
    pub wall_clock_time: IsoDuration,
    #[serde(rename = "readIOps")]
    pub read_iops: i64,
    #[serde(rename = "writeIOps")]
    pub write_iops: i64,
    #[serde(rename = "readIOGiB")]
    pub read_io_gib: f64,
    #[serde(rename = "writeIOGiB")]
    pub write_io_gib: f64,
    pub wait_time: IsoDuration,
}
