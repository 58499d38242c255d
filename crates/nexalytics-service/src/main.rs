//! Nexus Analytics service
//!
//! - JSON endpoints: /, /health, /analytics/query, /metrics/summary
//! - Every request instrumented with count/duration/success/error metrics
//! - Background system sampler publishing a cached snapshot
//! - Lifecycle counters on startup and graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use nexalytics_service::{app_state, config, metrics, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("nexalytics.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .service
        .listen
        .parse()
        .expect("service.listen must be a valid SocketAddr");

    let env = config::MetricsEnv::from_env();
    if env.logs_injection {
        tracing::info!(service = %env.service, env = %env.env, "logs injection enabled");
    }

    let client = Arc::new(metrics::MetricsClient::from_env(&env, &cfg.telemetry.metric_prefix).await);
    let snapshot_rx = metrics::sampler::spawn(client.clone(), cfg.telemetry.sample_interval_ms);

    let state = app_state::AppState::new(cfg, client.clone(), snapshot_rx);
    let app = router::build_router(state);

    client.increment_counter("service.startup", 1, vec![]).await;

    tracing::info!(%listen, "nexalytics-service starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    client.increment_counter("service.shutdown", 1, vec![]).await;
    tracing::info!("nexalytics-service stopped");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
