//! Per-call option bags and the response headers every call reports back.
//!
//! Option bags are small building blocks composed per operation; the
//! per-operation names at the bottom of this module are aliases over them.
//! Each bag renders itself into query parameters and headers through
//! [`ApplyOptions`].

use crate::domain::models::Timestamp;
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::validate_range;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

pub const MAX_RESULTS_LIMIT: u32 = 1000;

pub const CLIENT_REQUEST_ID: &str = "client-request-id";
pub const RETURN_CLIENT_REQUEST_ID: &str = "return-client-request-id";
pub const OCP_DATE: &str = "ocp-date";
pub const OCP_RANGE: &str = "ocp-range";
pub const REQUEST_ID: &str = "request-id";
pub const DATA_SERVICE_ID: &str = "dataserviceid";

/// Query parameters and headers accumulated for one request.
#[derive(Debug, Default)]
pub struct RequestParts {
    pub query: Vec<(&'static str, String)>,
    pub headers: HeaderMap,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&mut self, name: &'static str, value: impl ToString) {
        self.query.push((name, value.to_string()));
    }

    pub fn header(&mut self, name: &'static str, value: &str) -> Result<()> {
        let header_value =
            HeaderValue::from_str(value).map_err(|_| BatchClientError::InvalidHeader {
                name: name.to_string(),
                value: value.to_string(),
            })?;
        self.headers.insert(HeaderName::from_static(name), header_value);
        Ok(())
    }
}

/// Renders an option bag onto a request.
pub trait ApplyOptions: Send + Sync {
    fn apply(&self, parts: &mut RequestParts) -> Result<()>;
}

/// HTTP-date as used by `ocp-date` and the conditional headers.
pub fn format_http_date(time: &Timestamp) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn parse_http_date(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|t| t.with_timezone(&chrono::Utc))
}

/// Options every operation accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Server-side processing limit in seconds.
    pub timeout: Option<u32>,
    pub client_request_id: Option<String>,
    pub return_client_request_id: Option<bool>,
    pub ocp_date: Option<Timestamp>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_client_request_id(mut self, id: impl Into<String>) -> Self {
        self.client_request_id = Some(id.into());
        self.return_client_request_id = Some(true);
        self
    }
}

impl ApplyOptions for RequestOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(timeout) = self.timeout {
            parts.query("timeout", timeout);
        }
        if let Some(id) = &self.client_request_id {
            parts.header(CLIENT_REQUEST_ID, id)?;
        }
        if let Some(flag) = self.return_client_request_id {
            parts.header(RETURN_CLIENT_REQUEST_ID, if flag { "true" } else { "false" })?;
        }
        if let Some(date) = &self.ocp_date {
            parts.header(OCP_DATE, &format_http_date(date))?;
        }
        Ok(())
    }
}

/// Optimistic concurrency preconditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessConditions {
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<Timestamp>,
    pub if_unmodified_since: Option<Timestamp>,
}

impl AccessConditions {
    pub fn if_match(etag: impl Into<String>) -> Self {
        Self {
            if_match: Some(etag.into()),
            ..Default::default()
        }
    }

    pub fn if_none_match(etag: impl Into<String>) -> Self {
        Self {
            if_none_match: Some(etag.into()),
            ..Default::default()
        }
    }
}

impl ApplyOptions for AccessConditions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(etag) = &self.if_match {
            parts.header("if-match", etag)?;
        }
        if let Some(etag) = &self.if_none_match {
            parts.header("if-none-match", etag)?;
        }
        if let Some(time) = &self.if_modified_since {
            parts.header("if-modified-since", &format_http_date(time))?;
        }
        if let Some(time) = &self.if_unmodified_since {
            parts.header("if-unmodified-since", &format_http_date(time))?;
        }
        Ok(())
    }
}

/// OData query options for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filter: Option<String>,
    pub select: Option<String>,
    pub expand: Option<String>,
    /// 1..=1000; the service defaults to 1000.
    pub max_results: Option<u32>,
    pub request: RequestOptions,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl ApplyOptions for ListOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(filter) = &self.filter {
            parts.query("$filter", filter);
        }
        if let Some(select) = &self.select {
            parts.query("$select", select);
        }
        if let Some(expand) = &self.expand {
            parts.query("$expand", expand);
        }
        if let Some(max_results) = self.max_results {
            validate_range("maxresults", max_results, 1, MAX_RESULTS_LIMIT)?;
            parts.query("maxresults", max_results);
        }
        self.request.apply(parts)
    }
}

/// Projection and preconditions for single-resource reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    pub select: Option<String>,
    pub expand: Option<String>,
    pub request: RequestOptions,
    pub conditions: AccessConditions,
}

impl GetOptions {
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }
}

impl ApplyOptions for GetOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(select) = &self.select {
            parts.query("$select", select);
        }
        if let Some(expand) = &self.expand {
            parts.query("$expand", expand);
        }
        self.request.apply(parts)?;
        self.conditions.apply(parts)
    }
}

/// Request options plus preconditions; used by writes, actions and conditional HEADs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub request: RequestOptions,
    pub conditions: AccessConditions,
}

impl WriteOptions {
    pub fn with_conditions(conditions: AccessConditions) -> Self {
        Self {
            request: RequestOptions::default(),
            conditions,
        }
    }
}

impl ApplyOptions for WriteOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        self.request.apply(parts)?;
        self.conditions.apply(parts)
    }
}

/// Inclusive byte range rendered as `ocp-range: bytes=start-end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    pub fn header_value(&self) -> String {
        match self.end {
            Some(end) => format!("bytes={}-{}", self.start, end),
            None => format!("bytes={}-", self.start),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGetOptions {
    pub ocp_range: Option<ByteRange>,
    pub request: RequestOptions,
    pub conditions: AccessConditions,
}

impl FileGetOptions {
    pub fn range(start: u64, end: Option<u64>) -> Self {
        Self {
            ocp_range: Some(ByteRange { start, end }),
            ..Default::default()
        }
    }
}

impl ApplyOptions for FileGetOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(range) = &self.ocp_range {
            if range.end.is_some_and(|end| end < range.start) {
                return Err(BatchClientError::validation(format!(
                    "ocp-range {} ends before it starts",
                    range.header_value()
                )));
            }
            parts.header(OCP_RANGE, &range.header_value())?;
        }
        self.request.apply(parts)?;
        self.conditions.apply(parts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListOptions {
    pub list: ListOptions,
    pub recursive: Option<bool>,
}

impl ApplyOptions for FileListOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        self.list.apply(parts)?;
        if let Some(recursive) = self.recursive {
            parts.query("recursive", recursive);
        }
        Ok(())
    }
}

/// Deleting a directory requires `recursive=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDeleteOptions {
    pub recursive: Option<bool>,
    pub request: RequestOptions,
}

impl ApplyOptions for FileDeleteOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let Some(recursive) = self.recursive {
            parts.query("recursive", recursive);
        }
        self.request.apply(parts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMetricsOptions {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub list: ListOptions,
}

impl ApplyOptions for UsageMetricsOptions {
    fn apply(&self, parts: &mut RequestParts) -> Result<()> {
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time) {
            if end < start {
                return Err(BatchClientError::validation(
                    "usage metrics: endtime is earlier than starttime",
                ));
            }
        }
        if let Some(start) = &self.start_time {
            parts.query("starttime", start.to_rfc3339());
        }
        if let Some(end) = &self.end_time {
            parts.query("endtime", end.to_rfc3339());
        }
        self.list.apply(parts)
    }
}

/// Headers the service returns on every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    pub client_request_id: Option<String>,
    pub request_id: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<Timestamp>,
    /// Odata id of the created or updated resource.
    pub data_service_id: Option<String>,
}

impl ResponseHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let last_modified = text("last-modified").and_then(|value| {
            let parsed = parse_http_date(&value);
            if parsed.is_none() {
                debug!("Ignoring unparseable Last-Modified header: {}", value);
            }
            parsed
        });

        Self {
            client_request_id: text(CLIENT_REQUEST_ID),
            request_id: text(REQUEST_ID),
            etag: text("etag"),
            last_modified,
            data_service_id: text(DATA_SERVICE_ID),
        }
    }
}

pub type ApplicationListOptions = ListOptions;
pub type ApplicationGetOptions = RequestOptions;

pub type PoolListUsageMetricsOptions = UsageMetricsOptions;
pub type PoolGetAllLifetimeStatisticsOptions = RequestOptions;
pub type PoolAddOptions = RequestOptions;
pub type PoolListOptions = ListOptions;
pub type PoolDeleteOptions = WriteOptions;
pub type PoolExistsOptions = WriteOptions;
pub type PoolGetOptions = GetOptions;
pub type PoolPatchOptions = WriteOptions;
pub type PoolDisableAutoScaleOptions = RequestOptions;
pub type PoolEnableAutoScaleOptions = WriteOptions;
pub type PoolEvaluateAutoScaleOptions = RequestOptions;
pub type PoolResizeOptions = WriteOptions;
pub type PoolStopResizeOptions = WriteOptions;
pub type PoolUpdatePropertiesOptions = RequestOptions;
pub type PoolRemoveNodesOptions = WriteOptions;

pub type AccountListNodeAgentSkusOptions = ListOptions;
pub type AccountListPoolNodeCountsOptions = ListOptions;

pub type JobGetAllLifetimeStatisticsOptions = RequestOptions;
pub type JobDeleteOptions = WriteOptions;
pub type JobGetOptions = GetOptions;
pub type JobPatchOptions = WriteOptions;
pub type JobUpdateOptions = WriteOptions;
pub type JobDisableOptions = WriteOptions;
pub type JobEnableOptions = WriteOptions;
pub type JobTerminateOptions = WriteOptions;
pub type JobAddOptions = RequestOptions;
pub type JobListOptions = ListOptions;
pub type JobListFromJobScheduleOptions = ListOptions;
pub type JobListPreparationAndReleaseTaskStatusOptions = ListOptions;
pub type JobGetTaskCountsOptions = RequestOptions;

pub type CertificateAddOptions = RequestOptions;
pub type CertificateListOptions = ListOptions;
pub type CertificateCancelDeletionOptions = RequestOptions;
pub type CertificateDeleteOptions = RequestOptions;
pub type CertificateGetOptions = GetOptions;

pub type FileDeleteFromTaskOptions = FileDeleteOptions;
pub type FileGetFromTaskOptions = FileGetOptions;
pub type FileGetPropertiesFromTaskOptions = WriteOptions;
pub type FileDeleteFromComputeNodeOptions = FileDeleteOptions;
pub type FileGetFromComputeNodeOptions = FileGetOptions;
pub type FileGetPropertiesFromComputeNodeOptions = WriteOptions;
pub type FileListFromTaskOptions = FileListOptions;
pub type FileListFromComputeNodeOptions = FileListOptions;

pub type JobScheduleExistsOptions = WriteOptions;
pub type JobScheduleDeleteOptions = WriteOptions;
pub type JobScheduleGetOptions = GetOptions;
pub type JobSchedulePatchOptions = WriteOptions;
pub type JobScheduleUpdateOptions = WriteOptions;
pub type JobScheduleDisableOptions = WriteOptions;
pub type JobScheduleEnableOptions = WriteOptions;
pub type JobScheduleTerminateOptions = WriteOptions;
pub type JobScheduleAddOptions = RequestOptions;
pub type JobScheduleListOptions = ListOptions;

pub type TaskAddOptions = RequestOptions;
pub type TaskListOptions = ListOptions;
pub type TaskAddCollectionOptions = RequestOptions;
pub type TaskDeleteOptions = WriteOptions;
pub type TaskGetOptions = GetOptions;
pub type TaskUpdateOptions = WriteOptions;
pub type TaskListSubtasksOptions = GetOptions;
pub type TaskTerminateOptions = WriteOptions;
pub type TaskReactivateOptions = WriteOptions;

pub type ComputeNodeAddUserOptions = RequestOptions;
pub type ComputeNodeDeleteUserOptions = RequestOptions;
pub type ComputeNodeUpdateUserOptions = RequestOptions;
pub type ComputeNodeGetOptions = GetOptions;
pub type ComputeNodeRebootOptions = RequestOptions;
pub type ComputeNodeReimageOptions = RequestOptions;
pub type ComputeNodeDisableSchedulingOptions = RequestOptions;
pub type ComputeNodeEnableSchedulingOptions = RequestOptions;
pub type ComputeNodeGetRemoteLoginSettingsOptions = RequestOptions;
pub type ComputeNodeGetRemoteDesktopOptions = RequestOptions;
pub type ComputeNodeUploadBatchServiceLogsOptions = RequestOptions;
pub type ComputeNodeListOptions = ListOptions;
