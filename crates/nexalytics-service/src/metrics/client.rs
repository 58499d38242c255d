//! Metrics client.
//!
//! Construction never fails: a missing API key or a transport setup fault
//! degrades to a disabled client that turns every emission into a no-op.
//! Once disabled, a client never becomes initialized again.
//!
//! Emission failures are uniformly logged and swallowed, for all metric
//! kinds. A flaky collector must never fail a request.

use std::sync::Arc;

use nexalytics_core::metric::{MetricEvent, MetricKind, SystemSnapshot};

use crate::config::MetricsEnv;
use crate::metrics::sink::{AgentSink, AgentlessSink, MetricSink};

pub struct MetricsClient {
    prefix: String,
    default_tags: Vec<String>,
    sink: Option<Arc<dyn MetricSink>>,
}

impl MetricsClient {
    /// Build from environment-supplied collector settings.
    pub async fn from_env(env: &MetricsEnv, prefix: &str) -> Self {
        let Some(api_key) = env.api_key.clone() else {
            tracing::warn!("DD_API_KEY not set, metrics emission disabled");
            return Self::disabled(prefix);
        };

        if let Some(reason) = &env.setup_error {
            tracing::error!(%reason, "metrics transport setup failed, emission disabled");
            return Self::disabled(prefix);
        }

        let default_tags = vec![format!("service:{}", env.service), format!("env:{}", env.env)];

        let sink: Arc<dyn MetricSink> = if env.agentless {
            tracing::info!("agentless mode, submitting directly to the collector API");
            Arc::new(AgentlessSink::new(api_key, env.app_key.clone()))
        } else {
            match AgentSink::connect(&env.agent_host, env.agent_port).await {
                Ok(s) => Arc::new(s),
                Err(e) => {
                    tracing::error!(error = %e, "metrics transport setup failed, emission disabled");
                    return Self::disabled(prefix);
                }
            }
        };

        tracing::info!(sink = sink.name(), "metrics client initialized");
        Self {
            prefix: prefix.to_string(),
            default_tags,
            sink: Some(sink),
        }
    }

    /// Client that drops every event. Used when credentials are absent and
    /// by tests that only exercise the HTTP surface.
    pub fn disabled(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            default_tags: Vec::new(),
            sink: None,
        }
    }

    /// Client with an explicit sink. Main wiring for tests that assert on
    /// emitted events.
    pub fn with_sink(prefix: &str, default_tags: Vec<String>, sink: Arc<dyn MetricSink>) -> Self {
        Self {
            prefix: prefix.to_string(),
            default_tags,
            sink: Some(sink),
        }
    }

    pub fn initialized(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn increment_counter(&self, name: &str, value: u64, tags: Vec<String>) {
        self.emit(name, MetricKind::Counter, value as f64, tags).await;
    }

    pub async fn record_gauge(&self, name: &str, value: f64, tags: Vec<String>) {
        self.emit(name, MetricKind::Gauge, value, tags).await;
    }

    pub async fn record_histogram(&self, name: &str, value: f64, tags: Vec<String>) {
        self.emit(name, MetricKind::Histogram, value, tags).await;
    }

    /// Record a timing in milliseconds.
    pub async fn record_timing(&self, name: &str, value: f64, tags: Vec<String>) {
        self.emit(name, MetricKind::Timing, value, tags).await;
    }

    /// Emit the three system gauges from an already-sampled snapshot. The
    /// sampler owns the (slow) sampling; callers never block here.
    pub async fn track_system_metrics(&self, snapshot: &SystemSnapshot) {
        if self.sink.is_none() {
            return;
        }
        self.record_gauge("system.cpu_percent", snapshot.cpu_percent, vec![]).await;
        self.record_gauge("system.memory_percent", snapshot.memory_percent, vec![]).await;
        self.record_gauge("system.memory_available_mb", snapshot.memory_available_mb, vec![])
            .await;
    }

    async fn emit(&self, name: &str, kind: MetricKind, value: f64, tags: Vec<String>) {
        let Some(sink) = &self.sink else {
            return;
        };

        let mut tags = tags;
        tags.extend(self.default_tags.iter().cloned());

        let event = MetricEvent::new(format!("{}.{name}", self.prefix), kind, value, tags);
        if let Err(e) = sink.emit(&event).await {
            tracing::warn!(metric = %event.name, error = %e, "metric emission failed");
        }
    }
}
