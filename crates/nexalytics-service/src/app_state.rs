//! Shared application state for the Nexus Analytics service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use nexalytics_core::metric::SystemSnapshot;

use crate::config::ServiceConfig;
use crate::metrics::MetricsClient;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    metrics: Arc<MetricsClient>,
    // Atomic so concurrent queries never lose an update or reuse an id.
    query_counter: AtomicU64,
    snapshot_rx: watch::Receiver<SystemSnapshot>,
}

impl AppState {
    pub fn new(
        cfg: ServiceConfig,
        metrics: Arc<MetricsClient>,
        snapshot_rx: watch::Receiver<SystemSnapshot>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                metrics,
                query_counter: AtomicU64::new(0),
                snapshot_rx,
            }),
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &MetricsClient {
        &self.inner.metrics
    }

    /// Claim the next query id (1-based, strictly increasing).
    pub fn next_query_id(&self) -> u64 {
        self.inner.query_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn queries_processed(&self) -> u64 {
        self.inner.query_counter.load(Ordering::Relaxed)
    }

    /// Latest cached system snapshot. Never blocks; returns zeros until the
    /// sampler's first tick completes.
    pub fn system_snapshot(&self) -> SystemSnapshot {
        *self.inner.snapshot_rx.borrow()
    }
}
