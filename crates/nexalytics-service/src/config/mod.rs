//! Service config loader (strict parsing).
//!
//! The YAML file carries service settings only. Collector credentials always
//! come from the environment (see [`schema::MetricsEnv`]) so a checked-in
//! config can never leak an API key.

pub mod schema;

use std::fs;

use nexalytics_core::error::{NexaError, Result};

pub use schema::{MetricsEnv, ServiceConfig, ServiceSection, TelemetrySection};

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| NexaError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| NexaError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
