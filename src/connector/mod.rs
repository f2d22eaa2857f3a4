//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat transports (reqwest over HTTP, offline mock)
//! - Storage (JSON settings file, script files on disk)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
