//! Top-level facade crate for Nexus Analytics.
//!
//! Re-exports core types and the service library so users can depend on a single crate.

pub mod core {
    pub use nexalytics_core::*;
}

pub mod service {
    pub use nexalytics_service::*;
}
