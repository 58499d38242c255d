//! Request instrumentation.
//!
//! Wraps every request: one `request.count` before the handler runs, then a
//! `request.duration` histogram and a success/error counter once the
//! response is known. The response itself passes through unchanged; this
//! layer never swallows a failure.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use nexalytics_core::error::ErrorKind;

use crate::app_state::AppState;

/// Marker inserted into response extensions by the error envelope so the
/// instrumentation can tag `request.error` with the failure kind.
#[derive(Debug, Clone, Copy)]
pub struct ErrorKindTag(pub ErrorKind);

pub async fn instrument_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let tags = vec![format!("method:{method}"), format!("path:{path}")];

    let metrics = state.metrics();
    metrics.increment_counter("request.count", 1, tags.clone()).await;

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let status = response.status();

    let mut duration_tags = tags.clone();
    duration_tags.push(format!("status:{}", status.as_u16()));
    metrics.record_histogram("request.duration", elapsed_ms, duration_tags).await;

    if status.is_success() {
        metrics.increment_counter("request.success", 1, tags.clone()).await;
    }

    if let Some(ErrorKindTag(kind)) = response.extensions().get::<ErrorKindTag>() {
        let mut error_tags = tags.clone();
        error_tags.push(format!("error:{}", kind.as_str()));
        metrics.increment_counter("request.error", 1, error_tags).await;
    }

    // Centralized accounting for every HTTP-level failure, including
    // framework rejections (unknown route, malformed body) that never
    // reached a handler.
    if status.as_u16() >= 400 {
        metrics
            .increment_counter(
                "http.error",
                1,
                vec![format!("status:{}", status.as_u16()), format!("path:{path}")],
            )
            .await;
    }

    response
}
