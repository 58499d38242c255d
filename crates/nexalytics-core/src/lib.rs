//! Nexus Analytics core: metric event model, system snapshot, and error types.
//!
//! This crate defines the metric wire contracts and error surface shared by the
//! service, its sinks, and tooling. It intentionally carries no transport or
//! runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `NexaError`/`Result` so production
//! processes do not crash on bad input or a flaky collector.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;

/// Shared result type.
pub use error::{NexaError, Result};
pub use metric::{MetricEvent, MetricKind, SystemSnapshot};
