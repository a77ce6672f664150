use crate::domain::options::{FileListOptions, ListOptions};
use clap::{Args, Subcommand};

/// OData arguments shared by the list subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// OData `$filter` clause, e.g. "state eq 'active'"
    #[arg(long)]
    pub filter: Option<String>,

    /// OData `$select` clause
    #[arg(long)]
    pub select: Option<String>,

    /// Page size, 1 to 1000
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Follow continuation links and print every page
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    pub fn to_options(&self) -> ListOptions {
        ListOptions {
            filter: self.filter.clone(),
            select: self.select.clone(),
            max_results: self.max_results,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    ListApplications {
        #[command(flatten)]
        list: ListArgs,
    },
    ListPools {
        #[command(flatten)]
        list: ListArgs,
    },
    GetPool {
        pool_id: String,
    },
    ListNodes {
        pool_id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    GetNode {
        pool_id: String,
        node_id: String,
    },
    ListJobs {
        #[command(flatten)]
        list: ListArgs,
    },
    GetJob {
        job_id: String,
    },
    TaskCounts {
        job_id: String,
    },
    ListTasks {
        job_id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    GetTask {
        job_id: String,
        task_id: String,
    },
    ListSchedules {
        #[command(flatten)]
        list: ListArgs,
    },
    GetSchedule {
        job_schedule_id: String,
    },
    ListCertificates {
        #[command(flatten)]
        list: ListArgs,
    },
    ListNodeAgentSkus {
        #[command(flatten)]
        list: ListArgs,
    },
    ListPoolNodeCounts {
        #[command(flatten)]
        list: ListArgs,
    },
    ListTaskFiles {
        job_id: String,
        task_id: String,
        /// Include files in subdirectories
        #[arg(long)]
        recursive: bool,
        #[command(flatten)]
        list: ListArgs,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListApplications { .. } => "list-applications",
            Self::ListPools { .. } => "list-pools",
            Self::GetPool { .. } => "get-pool",
            Self::ListNodes { .. } => "list-nodes",
            Self::GetNode { .. } => "get-node",
            Self::ListJobs { .. } => "list-jobs",
            Self::GetJob { .. } => "get-job",
            Self::TaskCounts { .. } => "task-counts",
            Self::ListTasks { .. } => "list-tasks",
            Self::GetTask { .. } => "get-task",
            Self::ListSchedules { .. } => "list-schedules",
            Self::GetSchedule { .. } => "get-schedule",
            Self::ListCertificates { .. } => "list-certificates",
            Self::ListNodeAgentSkus { .. } => "list-node-agent-skus",
            Self::ListPoolNodeCounts { .. } => "list-pool-node-counts",
            Self::ListTaskFiles { .. } => "list-task-files",
        }
    }
}

pub fn file_list_options(list: &ListArgs, recursive: bool) -> FileListOptions {
    FileListOptions {
        list: list.to_options(),
        recursive: recursive.then_some(true),
    }
}
