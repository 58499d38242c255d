//! Background system-resource sampler.
//!
//! CPU measurement needs two refreshes with a delay in between, so sampling
//! is inherently slow. It runs on its own interval task and publishes the
//! latest [`SystemSnapshot`] through a watch channel; the request path only
//! ever reads the cached value.

use std::sync::Arc;

use sysinfo::System;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};

use nexalytics_core::metric::SystemSnapshot;

use crate::metrics::MetricsClient;

/// Spawn the sampler task. The returned receiver starts at the all-zero
/// snapshot and updates once per interval tick.
pub fn spawn(client: Arc<MetricsClient>, interval_ms: u64) -> watch::Receiver<SystemSnapshot> {
    let (tx, rx) = watch::channel(SystemSnapshot::default());
    tokio::spawn(run(client, interval_ms, tx));
    rx
}

async fn run(client: Arc<MetricsClient>, interval_ms: u64, tx: watch::Sender<SystemSnapshot>) {
    let mut sys = System::new();
    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tick.tick().await;
        let snapshot = sample(&mut sys).await;

        if tx.send(snapshot).is_err() {
            // all receivers gone, the service is shutting down
            break;
        }

        client.track_system_metrics(&snapshot).await;
    }
}

async fn sample(sys: &mut System) -> SystemSnapshot {
    sys.refresh_cpu_usage();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let total = sys.total_memory();
    let memory_percent = if total == 0 {
        0.0
    } else {
        sys.used_memory() as f64 / total as f64 * 100.0
    };

    SystemSnapshot {
        cpu_percent: sys.global_cpu_usage() as f64,
        memory_percent,
        memory_available_mb: sys.available_memory() as f64 / (1024.0 * 1024.0),
    }
    .sanitized()
}
