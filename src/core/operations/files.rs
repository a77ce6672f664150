//! Files in task working directories and on compute nodes.
//!
//! The service reports a single file's properties only through response
//! headers; [`file_from_headers`] turns those into a [`NodeFile`].

use crate::core::client::BatchServiceClient;
use crate::domain::models::file::{FileProperties, NodeFile, NodeFileListResult};
use crate::domain::options::*;
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::validate_non_empty_string;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};
use reqwest::Method;
use tracing::debug;

pub const OCP_CREATION_TIME: &str = "ocp-creation-time";
pub const OCP_BATCH_FILE_IS_DIRECTORY: &str = "ocp-batch-file-isdirectory";
pub const OCP_BATCH_FILE_URL: &str = "ocp-batch-file-url";
pub const OCP_BATCH_FILE_MODE: &str = "ocp-batch-file-mode";

/// Properties of one file, read from a HEAD or GET response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePropertiesResponse {
    pub file: NodeFile,
    pub headers: ResponseHeaders,
}

/// File content plus the properties reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub file: NodeFile,
    pub headers: ResponseHeaders,
    pub data: Vec<u8>,
}

impl FileContent {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn file_from_headers(file_path: &str, headers: &HeaderMap) -> NodeFile {
    let text = |name: &str| header_str(headers, name);

    let properties = text(LAST_MODIFIED.as_str())
        .and_then(parse_http_date)
        .map(|last_modified| FileProperties {
            creation_time: text(OCP_CREATION_TIME).and_then(parse_http_date),
            last_modified,
            content_length: text(CONTENT_LENGTH.as_str())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            content_type: text(CONTENT_TYPE.as_str()).map(str::to_string),
            file_mode: text(OCP_BATCH_FILE_MODE).map(str::to_string),
        });
    if properties.is_none() {
        debug!("No Last-Modified header for {}, file properties omitted", file_path);
    }

    NodeFile {
        name: Some(file_path.to_string()),
        url: text(OCP_BATCH_FILE_URL).map(str::to_string),
        is_directory: text(OCP_BATCH_FILE_IS_DIRECTORY).map(|v| v.eq_ignore_ascii_case("true")),
        properties,
    }
}

/// Base segments followed by each non-empty component of `file_path`.
///
/// `.` and `..` are refused: the URL would otherwise collapse them and
/// address a different file.
fn file_segments<'p>(base: &[&'p str], file_path: &'p str) -> Result<Vec<&'p str>> {
    validate_non_empty_string("filePath", file_path)?;
    let components: Vec<&str> = file_path.split('/').filter(|s| !s.is_empty()).collect();
    if components.is_empty() {
        return Err(BatchClientError::validation(format!(
            "filePath '{}' names no file",
            file_path
        )));
    }
    if components.iter().any(|c| *c == "." || *c == "..") {
        return Err(BatchClientError::validation(format!(
            "filePath '{}' may not contain '.' or '..' components",
            file_path
        )));
    }
    let mut segments = base.to_vec();
    segments.extend(components);
    Ok(segments)
}

pub struct FileOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> FileOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn delete_from_task(
        &self,
        job_id: &str,
        task_id: &str,
        file_path: &str,
        options: &FileDeleteFromTaskOptions,
    ) -> Result<ResponseHeaders> {
        let segments = file_segments(&["jobs", job_id, "tasks", task_id, "files"], file_path)?;
        self.client
            .send_empty(Method::DELETE, &segments, options)
            .await
    }

    pub async fn get_from_task(
        &self,
        job_id: &str,
        task_id: &str,
        file_path: &str,
        options: &FileGetFromTaskOptions,
    ) -> Result<FileContent> {
        let segments = file_segments(&["jobs", job_id, "tasks", task_id, "files"], file_path)?;
        self.download(&segments, file_path, options).await
    }

    pub async fn get_properties_from_task(
        &self,
        job_id: &str,
        task_id: &str,
        file_path: &str,
        options: &FileGetPropertiesFromTaskOptions,
    ) -> Result<FilePropertiesResponse> {
        let segments = file_segments(&["jobs", job_id, "tasks", task_id, "files"], file_path)?;
        self.properties(&segments, file_path, options).await
    }

    pub async fn delete_from_compute_node(
        &self,
        pool_id: &str,
        node_id: &str,
        file_path: &str,
        options: &FileDeleteFromComputeNodeOptions,
    ) -> Result<ResponseHeaders> {
        let segments = file_segments(&["pools", pool_id, "nodes", node_id, "files"], file_path)?;
        self.client
            .send_empty(Method::DELETE, &segments, options)
            .await
    }

    pub async fn get_from_compute_node(
        &self,
        pool_id: &str,
        node_id: &str,
        file_path: &str,
        options: &FileGetFromComputeNodeOptions,
    ) -> Result<FileContent> {
        let segments = file_segments(&["pools", pool_id, "nodes", node_id, "files"], file_path)?;
        self.download(&segments, file_path, options).await
    }

    pub async fn get_properties_from_compute_node(
        &self,
        pool_id: &str,
        node_id: &str,
        file_path: &str,
        options: &FileGetPropertiesFromComputeNodeOptions,
    ) -> Result<FilePropertiesResponse> {
        let segments = file_segments(&["pools", pool_id, "nodes", node_id, "files"], file_path)?;
        self.properties(&segments, file_path, options).await
    }

    pub async fn list_from_task(
        &self,
        job_id: &str,
        task_id: &str,
        options: &FileListFromTaskOptions,
    ) -> Result<NodeFileListResult> {
        self.client
            .get_json(&["jobs", job_id, "tasks", task_id, "files"], options)
            .await
    }

    pub async fn list_from_compute_node(
        &self,
        pool_id: &str,
        node_id: &str,
        options: &FileListFromComputeNodeOptions,
    ) -> Result<NodeFileListResult> {
        self.client
            .get_json(&["pools", pool_id, "nodes", node_id, "files"], options)
            .await
    }

    async fn download(
        &self,
        segments: &[&str],
        file_path: &str,
        options: &FileGetOptions,
    ) -> Result<FileContent> {
        let (headers, data) = self.client.get_bytes(segments, options).await?;
        debug!("Downloaded {} bytes from {}", data.len(), file_path);
        Ok(FileContent {
            file: file_from_headers(file_path, &headers),
            headers: ResponseHeaders::from_headers(&headers),
            data,
        })
    }

    async fn properties(
        &self,
        segments: &[&str],
        file_path: &str,
        options: &WriteOptions,
    ) -> Result<FilePropertiesResponse> {
        let headers = self.client.head(segments, options).await?;
        Ok(FilePropertiesResponse {
            file: file_from_headers(file_path, &headers),
            headers: ResponseHeaders::from_headers(&headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reqwest::header::HeaderValue;

    #[test]
    fn test_file_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("ocp-creation-time", HeaderValue::from_static("Fri, 01 Mar 2024 10:00:00 GMT"));
        headers.insert("last-modified", HeaderValue::from_static("Fri, 01 Mar 2024 10:05:00 GMT"));
        headers.insert("content-length", HeaderValue::from_static("2048"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("ocp-batch-file-isdirectory", HeaderValue::from_static("False"));
        headers.insert("ocp-batch-file-mode", HeaderValue::from_static("0644"));
        headers.insert(
            "ocp-batch-file-url",
            HeaderValue::from_static("https://acct.westus.batch.azure.com/jobs/j1/tasks/t1/files/stdout.txt"),
        );

        let file = file_from_headers("stdout.txt", &headers);
        assert_eq!(file.name.as_deref(), Some("stdout.txt"));
        assert_eq!(file.is_directory, Some(false));
        let props = file.properties.unwrap();
        assert_eq!(props.content_length, 2048);
        assert_eq!(props.file_mode.as_deref(), Some("0644"));
        assert_eq!(
            props.creation_time,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_file_without_last_modified_has_no_properties() {
        let file = file_from_headers("wd", &HeaderMap::new());
        assert!(file.properties.is_none());
        assert!(file.is_directory.is_none());
    }

    #[test]
    fn test_file_segments_split_path() {
        let segments = file_segments(&["jobs", "j1", "tasks", "t1", "files"], "wd/sub dir/out.txt").unwrap();
        assert_eq!(
            segments,
            vec!["jobs", "j1", "tasks", "t1", "files", "wd", "sub dir", "out.txt"]
        );
        assert!(file_segments(&["jobs"], "").is_err());
        assert!(file_segments(&["jobs"], "//").is_err());
    }

    #[test]
    fn test_file_segments_reject_relative_components() {
        for path in ["wd/../b.txt", "../b.txt", "./b.txt", "wd/.", "wd/.."] {
            let err = file_segments(&["jobs", "j1", "tasks", "t1", "files"], path).unwrap_err();
            assert!(
                matches!(err, BatchClientError::ValidationError { .. }),
                "expected rejection of {:?}",
                path
            );
        }
        assert!(file_segments(&["jobs"], "wd/.hidden/..log").is_ok());
    }
}
