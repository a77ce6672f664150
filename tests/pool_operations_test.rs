use anyhow::Result;
use batch_rest_client::adapters::credentials::BearerTokenCredentials;
use batch_rest_client::domain::duration::IsoDuration;
use batch_rest_client::domain::models::common::{ImageReference, MetadataItem, StartTask};
use batch_rest_client::domain::models::pool::{
    AllocationState, ComputeNodeDeallocationOption, NodeRemoveParameter, PoolAddParameter,
    PoolEnableAutoScaleParameter, PoolEvaluateAutoScaleParameter, PoolPatchParameter,
    PoolResizeParameter, PoolState, PoolUpdatePropertiesParameter, VirtualMachineConfiguration,
};
use batch_rest_client::domain::options::{
    AccessConditions, GetOptions, ListOptions, RequestOptions, UsageMetricsOptions, WriteOptions,
};
use chrono::{TimeZone, Utc};
use batch_rest_client::{BatchClientError, BatchServiceClient};
use httpmock::prelude::*;
use httpmock::Method;
use serde_json::json;
use std::sync::Arc;

const API_VERSION: &str = "2018-12-01.8.0";

fn client_for(server: &MockServer) -> BatchServiceClient {
    BatchServiceClient::new(
        &server.base_url(),
        Arc::new(BearerTokenCredentials::new("test-token")),
    )
    .unwrap()
}

#[tokio::test]
async fn test_list_pools_sends_odata_query() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools")
            .query_param("api-version", API_VERSION)
            .query_param("$filter", "state eq 'active'")
            .query_param("$select", "id,state")
            .query_param("maxresults", "10")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "value": [
                    {"id": "render-pool", "state": "active", "allocationState": "steady",
                     "currentDedicatedNodes": 3, "currentLowPriorityNodes": 1},
                    {"id": "ingest-pool", "state": "active", "allocationState": "resizing"}
                ]
            }));
    });

    let client = client_for(&server);
    let options = ListOptions::new()
        .with_filter("state eq 'active'")
        .with_select("id,state")
        .with_max_results(10);
    let page = client.pools().list(&options).await?;

    list_mock.assert();
    assert_eq!(page.len(), 2);
    assert!(page.is_last_page());
    let first = &page.value[0];
    assert_eq!(first.id.as_deref(), Some("render-pool"));
    assert_eq!(first.state, Some(PoolState::Active));
    assert!(first.is_steady());
    assert_eq!(first.current_nodes(), 4);
    assert_eq!(page.value[1].allocation_state, Some(AllocationState::Resizing));
    Ok(())
}

#[tokio::test]
async fn test_add_pool_posts_json_body() -> Result<()> {
    let server = MockServer::start();
    let add_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools")
            .query_param("api-version", API_VERSION)
            .header("content-type", "application/json; odata=minimalmetadata; charset=utf-8")
            .header("client-request-id", "9b2c3f2e-0001")
            .header("return-client-request-id", "true")
            .json_body_partial(
                r#"{
                    "id": "render-pool",
                    "vmSize": "STANDARD_D2_V3",
                    "targetDedicatedNodes": 2,
                    "virtualMachineConfiguration": {
                        "imageReference": {"publisher": "Canonical", "offer": "UbuntuServer", "sku": "18.04-LTS"},
                        "nodeAgentSKUId": "batch.node.ubuntu 18.04"
                    }
                }"#,
            );
        then.status(201)
            .header("etag", "0x8D6A1B2C3D4E5F6")
            .header("request-id", "req-add-1")
            .header("client-request-id", "9b2c3f2e-0001")
            .header("dataserviceid", "https://acct.westus.batch.azure.com/pools/render-pool");
    });

    let mut pool = PoolAddParameter::new("render-pool", "STANDARD_D2_V3");
    pool.virtual_machine_configuration = Some(VirtualMachineConfiguration::new(
        ImageReference::marketplace("Canonical", "UbuntuServer", "18.04-LTS"),
        "batch.node.ubuntu 18.04",
    ));
    pool.target_dedicated_nodes = Some(2);

    let client = client_for(&server);
    let options = RequestOptions::new().with_client_request_id("9b2c3f2e-0001");
    let headers = client.pools().add(&pool, &options).await?;

    add_mock.assert();
    assert_eq!(headers.etag.as_deref(), Some("0x8D6A1B2C3D4E5F6"));
    assert_eq!(headers.request_id.as_deref(), Some("req-add-1"));
    assert_eq!(headers.client_request_id.as_deref(), Some("9b2c3f2e-0001"));
    assert_eq!(
        headers.data_service_id.as_deref(),
        Some("https://acct.westus.batch.azure.com/pools/render-pool")
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_pool_is_rejected_before_sending() -> Result<()> {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.path("/pools");
        then.status(201);
    });

    // Neither a cloud service nor a virtual machine configuration.
    let pool = PoolAddParameter::new("render-pool", "STANDARD_D2_V3");
    let err = client_for(&server)
        .pools()
        .add(&pool, &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BatchClientError::ValidationError { .. }));
    any_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_pool_exists_maps_not_found_to_false() -> Result<()> {
    let server = MockServer::start();
    let present = server.mock(|when, then| {
        when.method(Method::HEAD).path("/pools/render-pool");
        then.status(200);
    });
    let missing = server.mock(|when, then| {
        when.method(Method::HEAD).path("/pools/gone-pool");
        then.status(404).header("request-id", "req-404");
    });

    let client = client_for(&server);
    assert!(client.pools().exists("render-pool", &Default::default()).await?);
    assert!(!client.pools().exists("gone-pool", &Default::default()).await?);

    present.assert();
    missing.assert();
    Ok(())
}

#[tokio::test]
async fn test_get_pool_with_etag_precondition() -> Result<()> {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools/render-pool")
            .query_param("$expand", "stats")
            .header("if-none-match", "0x8D6A1B2C3D4E5F6");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "render-pool",
                "vmSize": "standard_d2_v3",
                "resizeTimeout": "PT15M",
                "enableAutoScale": true,
                "autoScaleFormula": "$TargetDedicatedNodes = 2;",
                "autoScaleEvaluationInterval": "PT5M"
            }));
    });

    let options = GetOptions {
        conditions: AccessConditions::if_none_match("0x8D6A1B2C3D4E5F6"),
        ..Default::default()
    }
    .with_expand("stats");
    let pool = client_for(&server)
        .pools()
        .get("render-pool", &options)
        .await?;

    get_mock.assert();
    assert_eq!(pool.enable_auto_scale, Some(true));
    assert_eq!(
        pool.resize_timeout.map(|d| d.to_string()).as_deref(),
        Some("PT15M")
    );
    Ok(())
}

#[tokio::test]
async fn test_resize_and_stop_resize() -> Result<()> {
    let server = MockServer::start();
    let resize_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/resize")
            .header("if-match", "0xETAG")
            .json_body(json!({"targetDedicatedNodes": 5, "resizeTimeout": "PT10M"}));
        then.status(202);
    });
    let stop_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/stopresize")
            .header("content-length", "0");
        then.status(202);
    });

    let client = client_for(&server);
    let resize = PoolResizeParameter {
        target_dedicated_nodes: Some(5),
        resize_timeout: Some("PT10M".parse()?),
        ..Default::default()
    };
    client
        .pools()
        .resize(
            "render-pool",
            &resize,
            &WriteOptions::with_conditions(AccessConditions::if_match("0xETAG")),
        )
        .await?;
    client
        .pools()
        .stop_resize("render-pool", &Default::default())
        .await?;

    resize_mock.assert();
    stop_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_pool_not_found_error_body() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pools/gone-pool");
        then.status(404)
            .header("content-type", "application/json")
            .header("request-id", "5c3a9e10-aaaa")
            .json_body(json!({
                "odata.metadata": "https://acct.westus.batch.azure.com/$metadata#Microsoft.Azure.Batch.Protocol.Entities.Container.errors/@Element",
                "code": "PoolNotFound",
                "message": {"lang": "en-US", "value": "The specified pool does not exist."}
            }));
    });

    let err = client_for(&server)
        .pools()
        .get("gone-pool", &Default::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.service_code(), Some("PoolNotFound"));
    match err {
        BatchClientError::ServiceError {
            status,
            request_id,
            error,
        } => {
            assert_eq!(status, 404);
            assert_eq!(request_id.as_deref(), Some("5c3a9e10-aaaa"));
            assert_eq!(
                error.and_then(|e| e.message_text().map(str::to_string)).as_deref(),
                Some("The specified pool does not exist.")
            );
        }
        other => panic!("expected a service error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_list_pools_tolerates_newer_states() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pools");
        then.status(200).json_body(json!({
            "value": [
                {"id": "render-pool", "state": "migrating", "allocationState": "rebalancing"},
                {"id": "ingest-pool", "state": "deleting", "allocationState": "stopping"}
            ]
        }));
    });

    let page = client_for(&server).pools().list(&Default::default()).await?;
    assert_eq!(page.len(), 2);
    assert_eq!(page.value[0].state, Some(PoolState::Unknown));
    assert_eq!(page.value[0].allocation_state, Some(AllocationState::Unknown));
    assert_eq!(page.value[1].state, Some(PoolState::Deleting));
    Ok(())
}

#[tokio::test]
async fn test_get_pool_with_empty_id_is_rejected() -> Result<()> {
    let server = MockServer::start();
    let collection = server.mock(|when, then| {
        when.method(GET).path("/pools/");
        then.status(200).json_body(json!({"value": []}));
    });

    let client = client_for(&server);
    for pool_id in ["", ".", ".."] {
        let err = client
            .pools()
            .get(pool_id, &GetOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BatchClientError::ValidationError { .. }));
    }
    collection.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_patch_and_update_pool_properties() -> Result<()> {
    let server = MockServer::start();
    let patch_mock = server.mock(|when, then| {
        when.method(Method::PATCH)
            .path("/pools/render-pool")
            .header("if-match", "0x8D0")
            .json_body(json!({"metadata": [{"name": "team", "value": "vfx"}]}));
        then.status(200).header("etag", "0x8D1");
    });
    let update_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/updateproperties")
            .json_body(json!({
                "startTask": {"commandLine": "/bin/sh -c setup.sh", "waitForSuccess": true},
                "certificateReferences": [],
                "applicationPackageReferences": [],
                "metadata": []
            }));
        then.status(204);
    });

    let client = client_for(&server);
    let patch = PoolPatchParameter {
        metadata: Some(vec![MetadataItem::new("team", "vfx")]),
        ..Default::default()
    };
    let headers = client
        .pools()
        .patch(
            "render-pool",
            &patch,
            &WriteOptions::with_conditions(AccessConditions::if_match("0x8D0")),
        )
        .await?;
    assert_eq!(headers.etag.as_deref(), Some("0x8D1"));

    let mut start_task = StartTask::new("/bin/sh -c setup.sh");
    start_task.wait_for_success = Some(true);
    let properties = PoolUpdatePropertiesParameter {
        start_task: Some(start_task),
        ..Default::default()
    };
    client
        .pools()
        .update_properties("render-pool", &properties, &Default::default())
        .await?;

    patch_mock.assert();
    update_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_autoscale_enable_evaluate_disable() -> Result<()> {
    let server = MockServer::start();
    let formula = "$TargetDedicatedNodes=2;";
    let enable_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/enableautoscale")
            .json_body(json!({
                "autoScaleFormula": formula,
                "autoScaleEvaluationInterval": "PT10M"
            }));
        then.status(200);
    });
    let evaluate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/evaluateautoscale")
            .json_body(json!({"autoScaleFormula": formula}));
        then.status(200).json_body(json!({
            "timestamp": "2024-03-01T10:00:00Z",
            "results": "$TargetDedicatedNodes=2;$NodeDeallocationOption=requeue"
        }));
    });
    let disable_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/disableautoscale")
            .header("content-length", "0");
        then.status(200);
    });

    let client = client_for(&server);
    let enable = PoolEnableAutoScaleParameter {
        auto_scale_formula: Some(formula.to_string()),
        auto_scale_evaluation_interval: Some(IsoDuration::from_minutes(10)),
    };
    client
        .pools()
        .enable_auto_scale("render-pool", &enable, &Default::default())
        .await?;

    let run = client
        .pools()
        .evaluate_auto_scale(
            "render-pool",
            &PoolEvaluateAutoScaleParameter {
                auto_scale_formula: formula.to_string(),
            },
            &Default::default(),
        )
        .await?;
    assert_eq!(run.result_value("TargetDedicatedNodes").as_deref(), Some("2"));
    assert!(run.error.is_none());

    client
        .pools()
        .disable_auto_scale("render-pool", &Default::default())
        .await?;

    enable_mock.assert();
    evaluate_mock.assert();
    disable_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_autoscale_interval_out_of_range_is_rejected() -> Result<()> {
    let server = MockServer::start();
    let enable_mock = server.mock(|when, then| {
        when.method(POST).path("/pools/render-pool/enableautoscale");
        then.status(200);
    });

    let enable = PoolEnableAutoScaleParameter {
        auto_scale_formula: Some("$TargetDedicatedNodes=1;".to_string()),
        auto_scale_evaluation_interval: Some(IsoDuration::from_minutes(1)),
    };
    let err = client_for(&server)
        .pools()
        .enable_auto_scale("render-pool", &enable, &Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BatchClientError::ValidationError { .. }));
    enable_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_remove_nodes_body() -> Result<()> {
    let server = MockServer::start();
    let remove_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pools/render-pool/removenodes")
            .json_body(json!({
                "nodeList": ["tvm-1", "tvm-2"],
                "resizeTimeout": "PT15M",
                "nodeDeallocationOption": "taskCompletion"
            }));
        then.status(202);
    });

    let parameter = NodeRemoveParameter {
        node_list: vec!["tvm-1".to_string(), "tvm-2".to_string()],
        resize_timeout: Some(IsoDuration::from_minutes(15)),
        node_deallocation_option: Some(ComputeNodeDeallocationOption::TaskCompletion),
    };
    client_for(&server)
        .pools()
        .remove_nodes("render-pool", &parameter, &Default::default())
        .await?;

    remove_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_usage_metrics_and_lifetime_statistics() -> Result<()> {
    let server = MockServer::start();
    let metrics_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/poolusagemetrics")
            .query_param("starttime", "2024-03-01T00:00:00+00:00")
            .query_param("endtime", "2024-03-02T00:00:00+00:00");
        then.status(200).json_body(json!({
            "value": [{
                "poolId": "render-pool",
                "startTime": "2024-03-01T00:00:00Z",
                "endTime": "2024-03-01T00:30:00Z",
                "vmSize": "standard_d2_v3",
                "totalCoreHours": 12.5
            }]
        }));
    });
    let stats_mock = server.mock(|when, then| {
        when.method(GET).path("/lifetimepoolstats");
        then.status(200).json_body(json!({
            "url": "https://acct.westus.batch.azure.com/lifetimepoolstats",
            "startTime": "2024-01-01T00:00:00Z",
            "lastUpdateTime": "2024-03-01T00:00:00Z",
            "usageStats": {
                "startTime": "2024-01-01T00:00:00Z",
                "lastUpdateTime": "2024-03-01T00:00:00Z",
                "dedicatedCoreTime": "PT12H"
            }
        }));
    });

    let client = client_for(&server);
    let options = UsageMetricsOptions {
        start_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        end_time: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    let metrics = client.pools().list_usage_metrics(&options).await?;
    assert_eq!(metrics.value[0].pool_id, "render-pool");
    assert_eq!(metrics.value[0].total_core_hours, 12.5);

    let stats = client
        .pools()
        .get_all_lifetime_statistics(&Default::default())
        .await?;
    assert_eq!(
        stats.usage_stats.map(|u| u.dedicated_core_time),
        Some(IsoDuration::from_hours(12))
    );

    metrics_mock.assert();
    stats_mock.assert();
    Ok(())
}
