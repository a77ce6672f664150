use crate::core::operations::{
    account::AccountOperations, applications::ApplicationOperations,
    certificates::CertificateOperations, compute_nodes::ComputeNodeOperations,
    files::FileOperations, job_schedules::JobScheduleOperations, jobs::JobOperations,
    pools::PoolOperations, tasks::TaskOperations,
};
use crate::domain::models::error::BatchError;
use crate::domain::options::{ApplyOptions, RequestParts, ResponseHeaders, REQUEST_ID};
use crate::domain::ports::{ConfigProvider, Credentials};
use crate::utils::error::{BatchClientError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_VERSION: &str = "2018-12-01.8.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const JSON_CONTENT_TYPE: &str = "application/json; odata=minimalmetadata; charset=utf-8";

pub const DEFAULT_USER_AGENT: &str = concat!("batch-rest-client/", env!("CARGO_PKG_VERSION"));

/// Client for one batch account.
///
/// Cloning is cheap: the HTTP connection pool and the credentials are shared.
#[derive(Clone)]
pub struct BatchServiceClient {
    base_url: Url,
    api_version: String,
    http: Client,
    credentials: Arc<dyn Credentials>,
}

impl std::fmt::Debug for BatchServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl BatchServiceClient {
    pub fn new(account_url: &str, credentials: Arc<dyn Credentials>) -> Result<Self> {
        let http = build_http_client(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )?;
        Self::with_http_client(account_url, credentials, http)
    }

    pub fn with_http_client(
        account_url: &str,
        credentials: Arc<dyn Credentials>,
        http: Client,
    ) -> Result<Self> {
        validate_url("account.url", account_url)?;
        let base_url = Url::parse(account_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BatchClientError::InvalidConfigValueError {
                field: "account.url".to_string(),
                value: account_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            http,
            credentials,
        })
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let http = build_http_client(config.timeout(), config.user_agent())?;
        let credentials = crate::adapters::credentials::credentials_from_config(config);
        let client = Self::with_http_client(config.account_url(), credentials, http)?
            .with_api_version(config.api_version());
        debug!(
            "Created batch client for {} (api-version {})",
            client.base_url, client.api_version
        );
        Ok(client)
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn applications(&self) -> ApplicationOperations<'_> {
        ApplicationOperations::new(self)
    }

    pub fn pools(&self) -> PoolOperations<'_> {
        PoolOperations::new(self)
    }

    pub fn accounts(&self) -> AccountOperations<'_> {
        AccountOperations::new(self)
    }

    pub fn jobs(&self) -> JobOperations<'_> {
        JobOperations::new(self)
    }

    pub fn certificates(&self) -> CertificateOperations<'_> {
        CertificateOperations::new(self)
    }

    pub fn files(&self) -> FileOperations<'_> {
        FileOperations::new(self)
    }

    pub fn job_schedules(&self) -> JobScheduleOperations<'_> {
        JobScheduleOperations::new(self)
    }

    pub fn tasks(&self) -> TaskOperations<'_> {
        TaskOperations::new(self)
    }

    pub fn compute_nodes(&self) -> ComputeNodeOperations<'_> {
        ComputeNodeOperations::new(self)
    }

    /// Account URL extended with percent-encoded path segments.
    ///
    /// Empty, `.` and `..` segments would address a different resource
    /// than the one named, so they are rejected.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.trim().is_empty() || **s == "." || **s == "..")
        {
            return Err(BatchClientError::validation(format!(
                "path segment {:?} does not name a resource",
                bad
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BatchClientError::ConfigError {
                message: format!("account URL {} cannot be used as a base", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends one request and maps non-success statuses to `ServiceError`.
    pub(crate) async fn execute(
        &self,
        method: Method,
        mut url: Url,
        options: &dyn ApplyOptions,
        body: Option<String>,
    ) -> Result<Response> {
        let mut parts = RequestParts::new();
        options.apply(&mut parts)?;

        let has_api_version = url.query_pairs().any(|(name, _)| name == "api-version");
        {
            let mut query = url.query_pairs_mut();
            if !has_api_version {
                query.append_pair("api-version", &self.api_version);
            }
            for (name, value) in &parts.query {
                query.append_pair(name, value);
            }
        }

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .headers(parts.headers);
        if let Some(authorization) = self.credentials.authorization().await? {
            request = request.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        } else if method == Method::POST {
            request = request.header(CONTENT_LENGTH, "0");
        }

        debug!("Sending {} {}", method, url.path());
        let response = request.send().await?;
        let status = response.status();
        debug!("Batch service responded {} for {} {}", status, method, url.path());

        if is_success(status) {
            Ok(response)
        } else {
            Err(service_error(response).await)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        options: &dyn ApplyOptions,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, options, None).await?;
        read_json(response).await
    }

    /// Sends a JSON body and decodes a JSON result.
    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        options: &dyn ApplyOptions,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let payload = serde_json::to_string(body)?;
        let response = self.execute(method, url, options, Some(payload)).await?;
        read_json(response).await
    }

    /// Sends a request whose only result is the response headers.
    pub(crate) async fn send_action<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        options: &dyn ApplyOptions,
        body: Option<&B>,
    ) -> Result<ResponseHeaders> {
        let url = self.endpoint(segments)?;
        let payload = body.map(serde_json::to_string).transpose()?;
        let response = self.execute(method, url, options, payload).await?;
        Ok(ResponseHeaders::from_headers(response.headers()))
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        segments: &[&str],
        options: &dyn ApplyOptions,
    ) -> Result<ResponseHeaders> {
        self.send_action::<()>(method, segments, options, None).await
    }

    /// HEAD probe: 404 means absent, other failures are errors.
    pub(crate) async fn exists(&self, segments: &[&str], options: &dyn ApplyOptions) -> Result<bool> {
        let url = self.endpoint(segments)?;
        match self.execute(Method::HEAD, url, options, None).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn head(&self, segments: &[&str], options: &dyn ApplyOptions) -> Result<HeaderMap> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::HEAD, url, options, None).await?;
        Ok(response.headers().clone())
    }

    pub(crate) async fn get_bytes(
        &self,
        segments: &[&str],
        options: &dyn ApplyOptions,
    ) -> Result<(HeaderMap, Vec<u8>)> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, options, None).await?;
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok((headers, bytes.to_vec()))
    }
}

fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 202 | 204 | 206)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn service_error(response: Response) -> BatchClientError {
    let status = response.status().as_u16();
    let request_id = response
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Failed to read error body: {}", e);
            Default::default()
        }
    };
    let error = serde_json::from_slice::<BatchError>(&body)
        .ok()
        .filter(|e| e.code.is_some() || e.message.is_some());

    match &error {
        Some(e) => warn!(
            "Batch service error {} (request-id {}): {}",
            status,
            request_id.as_deref().unwrap_or("-"),
            e
        ),
        None => warn!(
            "Batch service error {} (request-id {}) without an error body",
            status,
            request_id.as_deref().unwrap_or("-")
        ),
    }

    BatchClientError::ServiceError {
        status,
        error,
        request_id,
    }
}
