//! # Domain Layer
//!
//! Chat-completion wire models, settings, script tasks and the error type.
//! This layer has no knowledge of HTTP clients or the file system.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
