//! HTTP route handlers and the JSON error envelope.
//!
//! Every error leaves the service as `{"detail": <message>}` with an
//! appropriate status code. Internal exception text stays in the logs.

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use nexalytics_core::error::{ErrorKind, NexaError, Result};

use crate::app_state::AppState;
use crate::middleware::ErrorKindTag;

/// Handler error carried out through axum's response machinery.
pub struct ApiError(NexaError);

impl From<NexaError> for ApiError {
    fn from(e: NexaError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = match kind {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::QueryFailed | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self.0, kind = kind.as_str(), "request failed");

        let mut response = (status, Json(json!({ "detail": self.0.detail() }))).into_response();
        response.extensions_mut().insert(ErrorKindTag(kind));
        response
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Nexus Analytics Service" }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    state.metrics().increment_counter("health_check", 1, vec![]).await;

    Json(json!({
        "status": "healthy",
        "service": "nexus-analytics",
        "system_metrics": state.system_snapshot(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query_type: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

pub async fn analytics_query(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Json(req) = payload.map_err(|e| NexaError::BadRequest(format!("invalid body: {e}")))?;

    let start = std::time::Instant::now();
    let query_id = process_query(&state, &req)?;

    let metrics = state.metrics();
    metrics
        .increment_counter(
            "queries.processed",
            1,
            vec![format!("query_type:{}", req.query_type)],
        )
        .await;
    metrics
        .record_timing(
            "query.duration",
            start.elapsed().as_secs_f64() * 1000.0,
            vec![format!("query_type:{}", req.query_type)],
        )
        .await;

    Ok(Json(json!({
        "query_id": format!("query_{query_id}"),
        "query_type": req.query_type,
        "status": "processed",
        "result": { "sample_data": [1, 2, 3, 4, 5] },
    })))
}

fn process_query(state: &AppState, req: &QueryRequest) -> Result<u64> {
    if req.query_type.is_empty() {
        return Err(NexaError::BadRequest("query_type must not be empty".into()));
    }

    // Id is claimed only after validation so rejected queries never consume
    // a slot in the sequence.
    let query_id = state.next_query_id();
    tracing::debug!(query_id, query_type = %req.query_type, params = req.parameters.len(), "processing query");

    Ok(query_id)
}

/// Fallback for unmatched routes, keeping the error envelope uniform.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

pub async fn metrics_summary(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "analytics_queries_processed": state.queries_processed(),
        "system_metrics": state.system_snapshot(),
        "datadog_initialized": state.metrics().initialized(),
    }))
}
