use serde::Deserialize;

use nexalytics_core::error::{NexaError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NexaError::BadRequest("version must be 1".into()));
        }

        self.service.validate()?;
        self.telemetry.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(NexaError::BadRequest(
                "service.listen must be a valid socket address".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,

    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
            metric_prefix: default_metric_prefix(),
        }
    }
}

impl TelemetrySection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=60000).contains(&self.sample_interval_ms) {
            return Err(NexaError::BadRequest(
                "telemetry.sample_interval_ms must be between 1000 and 60000".into(),
            ));
        }
        if self.metric_prefix.is_empty() {
            return Err(NexaError::BadRequest(
                "telemetry.metric_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_sample_interval_ms() -> u64 {
    10000
}
fn default_metric_prefix() -> String {
    "nexus.analytics".into()
}

/// Collector settings read from the environment at startup. A missing API key
/// is not an error here; the metrics client degrades to disabled. A value
/// that is present but unparseable is a setup fault: it is captured in
/// `setup_error` and the client likewise degrades to disabled.
#[derive(Debug, Clone)]
pub struct MetricsEnv {
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub agent_host: String,
    pub agent_port: u16,
    pub agentless: bool,
    pub service: String,
    pub env: String,
    pub logs_injection: bool,
    pub setup_error: Option<String>,
}

impl MetricsEnv {
    pub fn from_env() -> Self {
        let (agent_port, setup_error) = match std::env::var("DD_DOGSTATSD_PORT") {
            Err(_) => (8125, None),
            Ok(v) => match v.parse() {
                Ok(p) => (p, None),
                Err(_) => (8125, Some(format!("DD_DOGSTATSD_PORT is not a valid port: {v:?}"))),
            },
        };

        Self {
            api_key: read_nonempty("DD_API_KEY"),
            app_key: read_nonempty("DD_APP_KEY"),
            agent_host: std::env::var("DD_AGENT_HOST").unwrap_or_else(|_| "localhost".into()),
            agent_port,
            agentless: read_bool("DD_AGENTLESS_MODE"),
            service: std::env::var("DD_SERVICE").unwrap_or_else(|_| "nexus-analytics".into()),
            env: std::env::var("DD_ENV").unwrap_or_else(|_| "development".into()),
            logs_injection: read_bool("DD_LOGS_INJECTION"),
            setup_error,
        }
    }
}

fn read_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn read_bool(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
