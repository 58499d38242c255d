//! Axum router wiring.
//!
//! The instrumentation layer wraps every route, including framework
//! rejections for unknown paths, so request accounting is complete.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, middleware, routes};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/analytics/query", post(routes::analytics_query))
        .route("/metrics/summary", get(routes::metrics_summary))
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::instrument_request,
        ))
        .with_state(state)
}
