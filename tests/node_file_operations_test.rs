use anyhow::Result;
use batch_rest_client::adapters::credentials::BearerTokenCredentials;
use batch_rest_client::domain::models::certificate::{CertificateAddParameter, CertificateFormat};
use batch_rest_client::domain::models::compute_node::{
    ComputeNodeRebootOption, ComputeNodeReimageOption, ComputeNodeState, ComputeNodeUser,
    DisableComputeNodeSchedulingOption, NodeDisableSchedulingParameter, NodeRebootParameter,
    NodeReimageParameter, NodeUpdateUserParameter, UploadBatchServiceLogsConfiguration,
};
use batch_rest_client::domain::options::{
    FileDeleteOptions, FileGetOptions, FileListOptions, ListOptions,
};
use chrono::{TimeZone, Utc};
use batch_rest_client::{BatchClientError, BatchServiceClient};
use httpmock::prelude::*;
use httpmock::Method;
use serde_json::json;
use std::sync::Arc;

fn client_for(server: &MockServer) -> BatchServiceClient {
    BatchServiceClient::new(
        &server.base_url(),
        Arc::new(BearerTokenCredentials::new("test-token")),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_node_and_remote_login_settings() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pools/render-pool/nodes/tvm-1");
        then.status(200).json_body(json!({
            "id": "tvm-1",
            "state": "idle",
            "schedulingState": "enabled",
            "vmSize": "standard_d2_v3",
            "ipAddress": "10.0.0.4",
            "totalTasksRun": 12
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/pools/render-pool/nodes/tvm-1/remoteloginsettings");
        then.status(200)
            .json_body(json!({"remoteLoginIPAddress": "40.112.0.9", "remoteLoginPort": 50000}));
    });

    let client = client_for(&server);
    let node = client
        .compute_nodes()
        .get("render-pool", "tvm-1", &Default::default())
        .await?;
    assert_eq!(node.state, Some(ComputeNodeState::Idle));
    assert!(node.is_schedulable());

    let login = client
        .compute_nodes()
        .get_remote_login_settings("render-pool", "tvm-1", &Default::default())
        .await?;
    assert_eq!(login.remote_login_ip_address, "40.112.0.9");
    assert_eq!(login.remote_login_port, 50000);
    Ok(())
}

#[tokio::test]
async fn test_node_user_and_reboot_bodies() -> Result<()> {
    let server = MockServer::start();
    let user_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/users")
            .json_body(json!({"name": "ops", "isAdmin": true, "sshPublicKey": "ssh-rsa AAAA"}));
        then.status(201);
    });
    let reboot_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/reboot")
            .json_body(json!({"nodeRebootOption": "taskCompletion"}));
        then.status(202);
    });
    let delete_user_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/pools/render-pool/nodes/tvm-1/users/ops");
        then.status(200);
    });

    let client = client_for(&server);
    let user = ComputeNodeUser {
        name: "ops".to_string(),
        is_admin: Some(true),
        expiry_time: None,
        password: None,
        ssh_public_key: Some("ssh-rsa AAAA".to_string()),
    };
    client
        .compute_nodes()
        .add_user("render-pool", "tvm-1", &user, &Default::default())
        .await?;
    client
        .compute_nodes()
        .reboot(
            "render-pool",
            "tvm-1",
            &NodeRebootParameter {
                node_reboot_option: Some(ComputeNodeRebootOption::TaskCompletion),
            },
            &Default::default(),
        )
        .await?;
    client
        .compute_nodes()
        .delete_user("render-pool", "tvm-1", "ops", &Default::default())
        .await?;

    user_mock.assert();
    reboot_mock.assert();
    delete_user_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_user_without_credentials_is_rejected() -> Result<()> {
    let server = MockServer::start();
    let user = ComputeNodeUser {
        name: "ops".to_string(),
        is_admin: None,
        expiry_time: None,
        password: None,
        ssh_public_key: None,
    };

    let err = client_for(&server)
        .compute_nodes()
        .add_user("render-pool", "tvm-1", &user, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BatchClientError::ValidationError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_certificate_paths_use_thumbprint_key() -> Result<()> {
    let server = MockServer::start();
    let add_mock = server.mock(|when, then| {
        when.method(POST).path("/certificates").json_body(json!({
            "thumbprint": "0123abcd",
            "thumbprintAlgorithm": "sha1",
            "data": "MIIC...",
            "certificateFormat": "cer"
        }));
        then.status(201);
    });
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/certificates(thumbprintAlgorithm=sha1,thumbprint=0123abcd)");
        then.status(200).json_body(json!({
            "thumbprint": "0123abcd",
            "thumbprintAlgorithm": "sha1",
            "state": "active",
            "publicData": "MIIC..."
        }));
    });
    let cancel_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/certificates(thumbprintAlgorithm=sha1,thumbprint=0123abcd)/canceldelete");
        then.status(204);
    });

    let client = client_for(&server);
    let mut certificate = CertificateAddParameter::sha1("0123abcd", "MIIC...");
    certificate.certificate_format = Some(CertificateFormat::Cer);
    client
        .certificates()
        .add(&certificate, &Default::default())
        .await?;

    let fetched = client
        .certificates()
        .get("sha1", "0123abcd", &Default::default())
        .await?;
    assert_eq!(fetched.thumbprint.as_deref(), Some("0123abcd"));

    client
        .certificates()
        .cancel_deletion("sha1", "0123abcd", &Default::default())
        .await?;

    add_mock.assert();
    get_mock.assert();
    cancel_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_get_task_file_with_range() -> Result<()> {
    let server = MockServer::start();
    let file_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs/nightly-render/tasks/frame-1/files/wd/logs/stdout.txt")
            .header("ocp-range", "bytes=0-4");
        then.status(206)
            .header("content-type", "text/plain")
            .header("last-modified", "Fri, 01 Mar 2024 10:05:00 GMT")
            .header("ocp-creation-time", "Fri, 01 Mar 2024 10:00:00 GMT")
            .header("ocp-batch-file-isdirectory", "False")
            .header("ocp-batch-file-url", "https://acct.westus.batch.azure.com/jobs/nightly-render/tasks/frame-1/files/wd/logs/stdout.txt")
            .body("hello");
    });

    let content = client_for(&server)
        .files()
        .get_from_task(
            "nightly-render",
            "frame-1",
            "wd/logs/stdout.txt",
            &FileGetOptions::range(0, Some(4)),
        )
        .await?;

    file_mock.assert();
    assert_eq!(content.text(), "hello");
    assert_eq!(content.file.name.as_deref(), Some("wd/logs/stdout.txt"));
    assert!(!content.file.is_directory());
    assert_eq!(content.file.size(), Some(5));
    Ok(())
}

#[tokio::test]
async fn test_file_properties_from_head() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::HEAD)
            .path("/pools/render-pool/nodes/tvm-1/files/startup/stderr.txt");
        then.status(200)
            .header("last-modified", "Fri, 01 Mar 2024 10:05:00 GMT")
            .header("content-length", "2048")
            .header("ocp-batch-file-mode", "0644")
            .header("ocp-batch-file-isdirectory", "false");
    });

    let response = client_for(&server)
        .files()
        .get_properties_from_compute_node(
            "render-pool",
            "tvm-1",
            "startup/stderr.txt",
            &Default::default(),
        )
        .await?;

    let properties = response.file.properties.expect("properties from headers");
    assert_eq!(properties.content_length, 2048);
    assert_eq!(properties.file_mode.as_deref(), Some("0644"));
    assert!(response.headers.last_modified.is_some());
    Ok(())
}

#[tokio::test]
async fn test_list_task_files_recursive() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/jobs/nightly-render/tasks/frame-1/files")
            .query_param("recursive", "true")
            .query_param("$filter", "startswith(name,'wd')");
        then.status(200).json_body(json!({
            "value": [
                {"name": "wd", "isDirectory": true, "url": "https://acct.westus.batch.azure.com/jobs/nightly-render/tasks/frame-1/files/wd"},
                {"name": "wd/out.exr", "isDirectory": false,
                 "properties": {"lastModified": "2024-03-01T10:05:00Z", "contentLength": 1048576,
                                "contentType": "application/octet-stream"}}
            ]
        }));
    });

    let options = FileListOptions {
        list: ListOptions::new().with_filter("startswith(name,'wd')"),
        recursive: Some(true),
    };
    let files = client_for(&server)
        .files()
        .list_from_task("nightly-render", "frame-1", &options)
        .await?;

    list_mock.assert();
    assert_eq!(files.len(), 2);
    assert!(files.value[0].is_directory());
    assert_eq!(files.value[1].size(), Some(1_048_576));
    Ok(())
}

#[tokio::test]
async fn test_node_maintenance_actions() -> Result<()> {
    let server = MockServer::start();
    let reimage_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/reimage")
            .json_body(json!({"nodeReimageOption": "retainedData"}));
        then.status(202);
    });
    let disable_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/disablescheduling")
            .json_body(json!({"nodeDisableSchedulingOption": "taskCompletion"}));
        then.status(200);
    });
    let enable_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/enablescheduling")
            .header("content-length", "0");
        then.status(200);
    });
    let update_user_mock = server.mock(|when, then| {
        when.method(Method::PUT)
            .path("/pools/render-pool/nodes/tvm-1/users/ops")
            .json_body(json!({
                "sshPublicKey": "ssh-rsa BBBB",
                "expiryTime": "2024-04-01T00:00:00Z"
            }));
        then.status(200);
    });

    let client = client_for(&server);
    let nodes = client.compute_nodes();
    nodes
        .reimage(
            "render-pool",
            "tvm-1",
            &NodeReimageParameter {
                node_reimage_option: Some(ComputeNodeReimageOption::RetainedData),
            },
            &Default::default(),
        )
        .await?;
    nodes
        .disable_scheduling(
            "render-pool",
            "tvm-1",
            &NodeDisableSchedulingParameter {
                node_disable_scheduling_option: Some(
                    DisableComputeNodeSchedulingOption::TaskCompletion,
                ),
            },
            &Default::default(),
        )
        .await?;
    nodes
        .enable_scheduling("render-pool", "tvm-1", &Default::default())
        .await?;
    let update = NodeUpdateUserParameter {
        ssh_public_key: Some("ssh-rsa BBBB".to_string()),
        expiry_time: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
        password: None,
    };
    nodes
        .update_user("render-pool", "tvm-1", "ops", &update, &Default::default())
        .await?;

    reimage_mock.assert();
    disable_mock.assert();
    enable_mock.assert();
    update_user_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_upload_logs_and_remote_desktop() -> Result<()> {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/nodes/tvm-1/uploadbatchservicelogs")
            .json_body(json!({
                "containerUrl": "https://store.blob.core.windows.net/logs?sv=2018",
                "startTime": "2024-03-01T00:00:00Z"
            }));
        then.status(200).json_body(json!({
            "virtualDirectoryName": "render-pool/tvm-1/2024-03-01",
            "numberOfFilesUploaded": 8
        }));
    });
    let rdp_mock = server.mock(|when, then| {
        when.method(GET).path("/pools/render-pool/nodes/tvm-1/rdp");
        then.status(200)
            .header("content-type", "application/octet-stream")
            .body("full address:s:10.0.0.4");
    });

    let client = client_for(&server);
    let configuration = UploadBatchServiceLogsConfiguration {
        container_url: "https://store.blob.core.windows.net/logs?sv=2018".to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        end_time: None,
    };
    let uploaded = client
        .compute_nodes()
        .upload_batch_service_logs("render-pool", "tvm-1", &configuration, &Default::default())
        .await?;
    assert_eq!(uploaded.number_of_files_uploaded, 8);
    assert_eq!(uploaded.virtual_directory_name, "render-pool/tvm-1/2024-03-01");

    let rdp = client
        .compute_nodes()
        .get_remote_desktop("render-pool", "tvm-1", &Default::default())
        .await?;
    assert_eq!(rdp, b"full address:s:10.0.0.4".to_vec());

    upload_mock.assert();
    rdp_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_delete_certificate() -> Result<()> {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/certificates(thumbprintAlgorithm=sha1,thumbprint=0123abcd)");
        then.status(202);
    });

    client_for(&server)
        .certificates()
        .delete("sha1", "0123abcd", &Default::default())
        .await?;

    delete_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_delete_files_from_task_and_node() -> Result<()> {
    let server = MockServer::start();
    let task_dir_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/jobs/nightly-render/tasks/frame-1/files/wd/scratch")
            .query_param("recursive", "true");
        then.status(200);
    });
    let node_file_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/pools/render-pool/nodes/tvm-1/files/workitems/old.log");
        then.status(200);
    });

    let client = client_for(&server);
    let recursive = FileDeleteOptions {
        recursive: Some(true),
        ..Default::default()
    };
    client
        .files()
        .delete_from_task("nightly-render", "frame-1", "wd/scratch", &recursive)
        .await?;
    client
        .files()
        .delete_from_compute_node("render-pool", "tvm-1", "workitems/old.log", &Default::default())
        .await?;

    task_dir_mock.assert();
    node_file_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_parent_directory_in_file_path_is_rejected() -> Result<()> {
    let server = MockServer::start();
    let collapsed = server.mock(|when, then| {
        when.method(DELETE).path("/jobs/j1/tasks/t1/files/wd/b.txt");
        then.status(200);
    });

    let err = client_for(&server)
        .files()
        .delete_from_task("j1", "t1", "wd/../b.txt", &Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BatchClientError::ValidationError { .. }));
    collapsed.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_node_file_get_properties_and_list() -> Result<()> {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools/render-pool/nodes/tvm-1/files/startup/stdout.txt");
        then.status(200)
            .header("last-modified", "Fri, 01 Mar 2024 10:05:00 GMT")
            .body("node ready");
    });
    let head_mock = server.mock(|when, then| {
        when.method(Method::HEAD)
            .path("/jobs/nightly-render/tasks/frame-1/files/stderr.txt");
        then.status(200)
            .header("last-modified", "Fri, 01 Mar 2024 10:05:00 GMT")
            .header("ocp-batch-file-isdirectory", "false");
    });
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools/render-pool/nodes/tvm-1/files")
            .query_param("recursive", "false");
        then.status(200).json_body(json!({
            "value": [
                {"name": "startup", "isDirectory": true},
                {"name": "workitems", "isDirectory": true}
            ]
        }));
    });

    let client = client_for(&server);
    let content = client
        .files()
        .get_from_compute_node("render-pool", "tvm-1", "startup/stdout.txt", &Default::default())
        .await?;
    assert_eq!(content.text(), "node ready");

    let properties = client
        .files()
        .get_properties_from_task("nightly-render", "frame-1", "stderr.txt", &Default::default())
        .await?;
    assert!(!properties.file.is_directory());
    assert!(properties.file.properties.is_some());

    let listing = client
        .files()
        .list_from_compute_node(
            "render-pool",
            "tvm-1",
            &FileListOptions {
                recursive: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(listing.value.iter().all(|f| f.is_directory()));

    get_mock.assert();
    head_mock.assert();
    list_mock.assert();
    Ok(())
}
