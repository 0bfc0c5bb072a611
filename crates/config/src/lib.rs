//! Configuration management for the chemical inventory system
//!
//! This crate holds the configuration schema with its template defaults,
//! loads it from YAML files and environment variables, and validates that
//! the form and spreadsheet identifiers have been filled in.

pub mod handle;
pub mod loader;
pub mod schema;
pub mod validation;

pub use handle::ConfigHandle;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
pub use types::{ConfigError, Environment};
