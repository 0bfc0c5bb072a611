//! Shared types for the chemical inventory configuration
//!
//! This crate contains the error types, the deployment environment and the
//! placeholder helpers used across the configuration components.

pub mod environment;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use environment::Environment;
pub use error::ConfigError;
