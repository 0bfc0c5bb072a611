//! Shared, read-only access to the loaded configuration

use crate::schema::Config;
use crate::validation::ConfigValidator;
use std::ops::Deref;
use std::sync::Arc;
use types::ConfigError;

/// Cheaply clonable handle to a configuration built once at startup.
///
/// Consumers receive the handle instead of reaching for a global; the
/// wrapped value is never mutated.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<Config>,
}

impl ConfigHandle {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    /// Handle over the shipped template
    pub fn template() -> Self {
        Self::new(Config::template())
    }

    /// Return the configuration unchanged
    pub fn get_config(&self) -> &Config {
        &self.inner
    }

    /// Check that the required identifiers have been replaced
    pub fn validate_config(&self) -> Result<bool, ConfigError> {
        ConfigValidator::validate_required(&self.inner)
    }
}

impl Deref for ConfigHandle {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Config> for ConfigHandle {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
