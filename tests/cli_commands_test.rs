#![cfg(feature = "cli")]

use anyhow::Result;
use batch_rest_client::app::commands;
use batch_rest_client::config::cli::{Command, ListArgs};
use batch_rest_client::domain::ports::ConfigProvider;
use batch_rest_client::{BatchServiceClient, CliConfig};
use clap::Parser;
use httpmock::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(server: &MockServer) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[account]
url = "{}"

[auth]
bearer_token = "file-token"

[http]
timeout_seconds = 5
"#,
        server.base_url()
    )?;
    Ok(file)
}

#[tokio::test]
async fn test_list_pools_command_with_config_file() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools")
            .query_param("maxresults", "5")
            .header("authorization", "Bearer file-token");
        then.status(200).json_body(json!({
            "value": [{"id": "render-pool", "state": "active"}],
            "odata.nextLink": "https://acct.westus.batch.azure.com/pools?$skiptoken=next"
        }));
    });

    let file = config_file(&server)?;
    let path = file.path().to_string_lossy().into_owned();
    let mut config = CliConfig::parse_from([
        "batch-cli",
        "--config",
        path.as_str(),
        "list-pools",
        "--max-results",
        "5",
    ]);
    config.load_file()?;
    assert_eq!(config.account_url(), server.base_url());

    let client = BatchServiceClient::from_config(&config)?;
    let output = commands::run(&client, &config.command).await?;

    list_mock.assert();
    assert_eq!(output["value"][0]["id"], "render-pool");
    assert_eq!(
        output["odata.nextLink"],
        "https://acct.westus.batch.azure.com/pools?$skiptoken=next"
    );
    Ok(())
}

#[tokio::test]
async fn test_list_all_command_flattens_pages() -> Result<()> {
    let server = MockServer::start();
    let next_link = server.url("/jobs/nightly-render/tasks?$skiptoken=2");
    server.mock(|when, then| {
        when.method(GET)
            .path("/jobs/nightly-render/tasks")
            .query_param("$filter", "state eq 'active'");
        then.status(200).json_body(json!({
            "value": [{"id": "frame-1"}],
            "odata.nextLink": next_link
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/jobs/nightly-render/tasks")
            .query_param("$skiptoken", "2");
        then.status(200).json_body(json!({"value": [{"id": "frame-2"}]}));
    });

    let client = BatchServiceClient::new(
        &server.base_url(),
        std::sync::Arc::new(batch_rest_client::adapters::credentials::AnonymousCredentials),
    )?;
    let command = Command::ListTasks {
        job_id: "nightly-render".to_string(),
        list: ListArgs {
            filter: Some("state eq 'active'".to_string()),
            all: true,
            ..Default::default()
        },
    };
    let output = commands::run(&client, &command).await?;

    let ids: Vec<_> = output
        .as_array()
        .map(|items| items.iter().filter_map(|t| t["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["frame-1", "frame-2"]);
    Ok(())
}

#[tokio::test]
async fn test_task_counts_command() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/jobs/nightly-render/taskcounts");
        then.status(200).json_body(json!({
            "active": 1, "running": 0, "completed": 3,
            "succeeded": 3, "failed": 0, "validationStatus": "unvalidated"
        }));
    });

    let file = config_file(&server)?;
    let path = file.path().to_string_lossy().into_owned();
    let mut config = CliConfig::parse_from([
        "batch-cli",
        "--config",
        path.as_str(),
        "task-counts",
        "nightly-render",
    ]);
    config.load_file()?;

    let client = BatchServiceClient::from_config(&config)?;
    let output = commands::run(&client, &config.command).await?;
    assert_eq!(output["completed"], 3);
    assert_eq!(output["validationStatus"], "unvalidated");
    Ok(())
}
