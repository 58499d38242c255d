//! Metrics client, emission sinks, and the background system sampler.

pub mod client;
pub mod sampler;
pub mod sink;

pub use client::MetricsClient;
pub use sink::{AgentSink, AgentlessSink, MetricSink};
