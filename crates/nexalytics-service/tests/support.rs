//! Shared helpers for service integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use http_body_util::BodyExt;
use tokio::sync::watch;
use tower::ServiceExt;

use nexalytics_core::error::Result;
use nexalytics_core::metric::{MetricEvent, SystemSnapshot};
use nexalytics_service::app_state::AppState;
use nexalytics_service::metrics::{MetricSink, MetricsClient};
use nexalytics_service::{config, router};

/// Stub transport that records every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MetricEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn named(&self, name: &str) -> Vec<MetricEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn emit(&self, event: &MetricEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub fn test_state(client: MetricsClient) -> AppState {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let (tx, rx) = watch::channel(SystemSnapshot::default());
    // watch receivers keep serving the last value after the sender is gone
    drop(tx);
    AppState::new(cfg, Arc::new(client), rx)
}

pub fn test_app(client: MetricsClient) -> axum::Router {
    router::build_router(test_state(client))
}

pub async fn get(app: &axum::Router, path: &str) -> (u16, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(resp).await
}

pub async fn post_json(app: &axum::Router, path: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(resp).await
}

async fn read_json(resp: Response<axum::body::Body>) -> (u16, serde_json::Value) {
    let status = resp.status().as_u16();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}
