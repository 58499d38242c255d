//! HTTP surface tests against a disabled metrics client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use serde_json::json;
use tokio::task::JoinSet;

use nexalytics_service::metrics::MetricsClient;

mod support;
use support::{get, post_json, test_app};

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Welcome to Nexus Analytics Service");
}

#[tokio::test]
async fn health_is_healthy_even_with_disabled_client() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "nexus-analytics");

    let sys = &body["system_metrics"];
    assert!(sys["cpu_percent"].is_number());
    assert!(sys["memory_percent"].is_number());
    assert!(sys["memory_available_mb"].is_number());
}

#[tokio::test]
async fn query_ids_start_at_one_and_increase() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));

    let (status, body) = post_json(&app, "/analytics/query", json!({"query_type": "user_activity"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["query_id"], "query_1");
    assert_eq!(body["query_type"], "user_activity");
    assert_eq!(body["status"], "processed");
    assert_eq!(body["result"]["sample_data"], json!([1, 2, 3, 4, 5]));

    let (_, body) = post_json(&app, "/analytics/query", json!({"query_type": "user_activity"})).await;
    assert_eq!(body["query_id"], "query_2");
}

#[tokio::test]
async fn concurrent_queries_get_distinct_ids_with_no_gaps() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));

    let mut tasks = JoinSet::new();
    for _ in 0..100 {
        let app = app.clone();
        tasks.spawn(async move {
            let (status, body) = post_json(&app, "/analytics/query", json!({"query_type": "load"})).await;
            assert_eq!(status, 200);
            body["query_id"].as_str().unwrap().to_string()
        });
    }

    let mut ids = HashSet::new();
    while let Some(res) = tasks.join_next().await {
        ids.insert(res.unwrap());
    }

    assert_eq!(ids.len(), 100);
    for n in 1..=100 {
        assert!(ids.contains(&format!("query_{n}")), "missing query_{n}");
    }
}

#[tokio::test]
async fn summary_reflects_exact_counter_value() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));

    for _ in 0..3 {
        let (status, _) = post_json(&app, "/analytics/query", json!({"query_type": "rollup"})).await;
        assert_eq!(status, 200);
    }

    let (status, body) = get(&app, "/metrics/summary").await;
    assert_eq!(status, 200);
    assert_eq!(body["analytics_queries_processed"], 3);
    assert_eq!(body["datadog_initialized"], false);
    assert!(body["system_metrics"]["cpu_percent"].is_number());
}

#[tokio::test]
async fn rejected_query_does_not_consume_an_id() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));

    let (status, body) = post_json(&app, "/analytics/query", json!({"query_type": ""})).await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Invalid request");

    let (_, body) = post_json(&app, "/analytics/query", json!({"query_type": "user_activity"})).await;
    assert_eq!(body["query_id"], "query_1");
}

#[tokio::test]
async fn malformed_body_yields_json_envelope() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));

    // missing required query_type field
    let (status, body) = post_json(&app, "/analytics/query", json!({"parameters": {}})).await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Invalid request");
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = test_app(MetricsClient::disabled("nexus.analytics"));
    let (status, body) = get(&app, "/nope").await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Not Found");
}
