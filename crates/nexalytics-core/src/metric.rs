//! Metric event model and dogstatsd line encoding (panic-free).
//!
//! Encoding rules:
//! - One event per line: `name:value|<kind>` with an optional `|#tag,tag` tail.
//! - Counter values are rendered as integers when whole, since most dogstatsd
//!   servers reject fractional counts.
//! - Tags are attached in the order the caller supplied them.

use serde::Serialize;

/// Metric type discriminant. Maps 1:1 to a dogstatsd type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Accumulating count.
    Counter,
    /// Point-in-time value (overwrites, not accumulates).
    Gauge,
    /// Distribution sample (e.g. response time) for percentile aggregation.
    Histogram,
    /// Duration in milliseconds.
    Timing,
}

impl MetricKind {
    /// Dogstatsd type suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            MetricKind::Counter => "c",
            MetricKind::Gauge => "g",
            MetricKind::Histogram => "h",
            MetricKind::Timing => "ms",
        }
    }

    /// Series-API type name used by the agentless submission path.
    pub fn series_type(self) -> &'static str {
        match self {
            MetricKind::Counter => "count",
            // The v1 series API has no histogram type; distributions are
            // submitted as gauges and aggregated upstream.
            MetricKind::Gauge | MetricKind::Histogram | MetricKind::Timing => "gauge",
        }
    }
}

/// A single fire-and-forget metric event. Emitted, never stored.
#[derive(Debug, Clone)]
pub struct MetricEvent {
    pub name: String,
    pub kind: MetricKind,
    pub value: f64,
    pub tags: Vec<String>,
}

impl MetricEvent {
    pub fn new(name: impl Into<String>, kind: MetricKind, value: f64, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            tags,
        }
    }

    /// Encode as a dogstatsd wire line.
    pub fn encode_dogstatsd(&self) -> String {
        let value = if self.value.fract() == 0.0 {
            format!("{}", self.value as i64)
        } else {
            format!("{}", self.value)
        };

        let mut line = format!("{}:{}|{}", self.name, value, self.kind.suffix());
        if !self.tags.is_empty() {
            line.push_str("|#");
            line.push_str(&self.tags.join(","));
        }
        line
    }
}

/// Point-in-time system resource reading. Computed by the background sampler;
/// request handlers only ever read the latest published value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_available_mb: f64,
}

impl SystemSnapshot {
    /// Clamp negative readings to zero. Some platforms report transient
    /// negative CPU deltas right after a refresh.
    pub fn sanitized(self) -> Self {
        Self {
            cpu_percent: self.cpu_percent.max(0.0),
            memory_percent: self.memory_percent.max(0.0),
            memory_available_mb: self.memory_available_mb.max(0.0),
        }
    }
}
