//! Emission transports.
//!
//! Two production sinks exist: dogstatsd lines over UDP to a local agent, and
//! direct HTTPS submission to the collector's series API (agentless mode).
//! Tests implement [`MetricSink`] with a recording stub.

use async_trait::async_trait;
use tokio::net::UdpSocket;

use nexalytics_core::error::{NexaError, Result};
use nexalytics_core::metric::MetricEvent;

/// Where metric events go. One sink is chosen at startup; the client treats
/// emission failures as log-and-continue (see [`super::MetricsClient`]).
#[async_trait]
pub trait MetricSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn emit(&self, event: &MetricEvent) -> Result<()>;
}

/// Dogstatsd over UDP to a forwarding agent.
pub struct AgentSink {
    socket: UdpSocket,
}

impl AgentSink {
    /// Bind an ephemeral local port and connect to the agent address.
    /// Resolution or bind failures surface here so the client can degrade
    /// to disabled instead of failing per-event later.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| NexaError::Internal(format!("dogstatsd socket bind failed: {e}")))?;
        socket
            .connect((host, port))
            .await
            .map_err(|e| NexaError::Internal(format!("dogstatsd connect failed: {e}")))?;
        Ok(Self { socket })
    }
}

#[async_trait]
impl MetricSink for AgentSink {
    fn name(&self) -> &'static str {
        "dogstatsd"
    }

    async fn emit(&self, event: &MetricEvent) -> Result<()> {
        let line = event.encode_dogstatsd();
        self.socket
            .send(line.as_bytes())
            .await
            .map_err(|e| NexaError::Internal(format!("dogstatsd send failed: {e}")))?;
        Ok(())
    }
}

const SERIES_API_BASE: &str = "https://api.datadoghq.com";

/// Direct submission to the collector's v1 series API, used when no local
/// agent is available (agentless mode).
pub struct AgentlessSink {
    client: reqwest::Client,
    api_key: String,
    app_key: Option<String>,
    base_url: String,
}

impl AgentlessSink {
    pub fn new(api_key: String, app_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            app_key,
            base_url: SERIES_API_BASE.into(),
        }
    }

    /// Point at a different collector endpoint. Tests use this against a
    /// loopback server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MetricSink for AgentlessSink {
    fn name(&self) -> &'static str {
        "agentless"
    }

    async fn emit(&self, event: &MetricEvent) -> Result<()> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let body = serde_json::json!({
            "series": [{
                "metric": event.name,
                "points": [[now, event.value]],
                "type": event.kind.series_type(),
                "tags": event.tags,
            }]
        });

        let mut req = self
            .client
            .post(format!("{}/api/v1/series", self.base_url))
            .header("DD-API-KEY", &self.api_key)
            .json(&body);
        if let Some(app_key) = &self.app_key {
            req = req.header("DD-APPLICATION-KEY", app_key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| NexaError::Internal(format!("series submit failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(NexaError::Internal(format!(
                "series submit rejected: {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
