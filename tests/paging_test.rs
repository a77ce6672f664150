use anyhow::Result;
use batch_rest_client::adapters::credentials::{AnonymousCredentials, EnvTokenCredentials};
use batch_rest_client::domain::models::job::CloudJob;
use batch_rest_client::domain::options::{ListOptions, RequestOptions};
use batch_rest_client::{BatchClientError, BatchServiceClient, PagedList};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn anonymous_client(server: &MockServer) -> BatchServiceClient {
    BatchServiceClient::new(&server.base_url(), Arc::new(AnonymousCredentials)).unwrap()
}

#[tokio::test]
async fn test_list_all_follows_next_links() -> Result<()> {
    let server = MockServer::start();
    let second_link = server.url("/jobs?api-version=2018-12-01.8.0&$skiptoken=page-2");
    let third_link = server.url("/jobs?api-version=2018-12-01.8.0&$skiptoken=page-3");

    let first = server.mock(|when, then| {
        when.method(GET).path("/jobs").query_param("maxresults", "2");
        then.status(200).json_body(json!({
            "value": [{"id": "job-1"}, {"id": "job-2"}],
            "odata.nextLink": second_link
        }));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs")
            .query_param("$skiptoken", "page-2")
            .header("client-request-id", "paging-run");
        then.status(200).json_body(json!({
            "value": [{"id": "job-3"}, {"id": "job-4"}],
            "odata.nextLink": third_link
        }));
    });
    let third = server.mock(|when, then| {
        when.method(GET).path("/jobs").query_param("$skiptoken", "page-3");
        then.status(200).json_body(json!({"value": [{"id": "job-5"}]}));
    });

    let client = anonymous_client(&server);
    let page = client
        .jobs()
        .list(&ListOptions::new().with_max_results(2))
        .await?;
    assert!(!page.is_last_page());

    let request = RequestOptions::new().with_client_request_id("paging-run");
    let jobs = client.list_all(page, &request).await?;

    first.assert();
    second.assert();
    third.assert();
    let ids: Vec<_> = jobs.iter().filter_map(|j| j.id.as_deref()).collect();
    assert_eq!(ids, vec!["job-1", "job-2", "job-3", "job-4", "job-5"]);
    Ok(())
}

#[tokio::test]
async fn test_next_link_keeps_its_api_version() -> Result<()> {
    let server = MockServer::start();
    let next = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs")
            .query_param("api-version", "2018-08-01.7.0")
            .query_param("$skiptoken", "older");
        then.status(200).json_body(json!({"value": []}));
    });

    let client = anonymous_client(&server);
    let link = server.url("/jobs?api-version=2018-08-01.7.0&$skiptoken=older");
    let page: PagedList<CloudJob> = client.list_next(&link, &Default::default()).await?;

    next.assert();
    assert!(page.is_empty());
    assert!(page.is_last_page());
    Ok(())
}

#[tokio::test]
async fn test_repeated_next_link_is_an_error() -> Result<()> {
    let server = MockServer::start();
    let loop_link = server.url("/jobs?$skiptoken=same");
    let looping = server.mock(|when, then| {
        when.method(GET).path("/jobs").query_param("$skiptoken", "same");
        then.status(200).json_body(json!({
            "value": [{"id": "job-x"}],
            "odata.nextLink": loop_link
        }));
    });

    let client = anonymous_client(&server);
    let first: PagedList<CloudJob> = PagedList {
        value: vec![],
        next_link: Some(server.url("/jobs?$skiptoken=same")),
    };
    let err = client.list_all(first, &Default::default()).await.unwrap_err();

    assert!(matches!(err, BatchClientError::PagingError { .. }));
    looping.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_foreign_next_link_is_refused() -> Result<()> {
    let server = MockServer::start();
    let client = anonymous_client(&server);

    let err = client
        .list_next::<CloudJob>("https://elsewhere.example.com/jobs?$skiptoken=1", &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BatchClientError::PagingError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_env_token_is_read_per_request() -> Result<()> {
    let server = MockServer::start();
    let authorized = server.mock(|when, then| {
        when.method(GET)
            .path("/certificates")
            .header("authorization", "Bearer rotated-token");
        then.status(200).json_body(json!({"value": []}));
    });

    let variable = "BATCH_PAGING_TEST_TOKEN";
    let client = BatchServiceClient::new(
        &server.base_url(),
        Arc::new(EnvTokenCredentials::new(variable)),
    )?;

    std::env::remove_var(variable);
    let err = client
        .certificates()
        .list(&Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BatchClientError::MissingConfigError { .. }));

    std::env::set_var(variable, "rotated-token");
    client.certificates().list(&Default::default()).await?;
    std::env::remove_var(variable);

    authorized.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_server_error_without_body() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/lifetimejobstats");
        then.status(503).header("request-id", "busy-1");
    });

    let err = anonymous_client(&server)
        .jobs()
        .get_all_lifetime_statistics(&Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.service_code().is_none());
    assert_eq!(
        err.severity(),
        batch_rest_client::utils::error::ErrorSeverity::Medium
    );
    Ok(())
}
