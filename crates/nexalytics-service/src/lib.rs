//! Nexus Analytics service library entry.
//!
//! This crate wires the config layer, metrics client + sinks, background
//! system sampler, request instrumentation, and route handlers into a
//! cohesive service stack. It is intended to be consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod routes;
