//! Configuration loader implementation

use crate::schema::Config;
use crate::validation::ConfigValidator;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::{debug, info};
use types::ConfigError;

/// Prefix for environment overrides, e.g. `INVENTORY_FORM_ID`
pub const ENV_PREFIX: &str = "INVENTORY_";

/// Separator for nested keys, e.g. `INVENTORY_SYSTEM__DECIMAL_PLACES`
pub const ENV_SEPARATOR: &str = "__";

/// Keys whose environment values are taken verbatim, never parsed as numbers
const IDENTIFIER_KEYS: [&str; 2] = ["form_id", "spreadsheet_id"];

const EXAMPLE_HEADER: &str = "\
# Chemical inventory configuration
#
# Replace form_id and spreadsheet_id with the IDs from the Google Form and
# Spreadsheet URLs before deploying. Keep the filled-in file out of public
# repositories.
";

/// Configuration loader that handles YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment variables.
    ///
    /// Missing keys fall back to the template values. Placeholder checks are
    /// not run here; see [`ConfigLoader::load_validated`].
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            }
            .into());
        }

        debug!(path = %config_path.display(), prefix = ENV_PREFIX, "merging configuration sources");

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
            path: config_path.display().to_string(),
            source,
        })?;

        let config: Config = Self::with_env(Self::file_figment(&content)?)
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration")?;

        info!(path = %config_path.display(), environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Config> {
        let config: Config = Self::file_figment(yaml_content)?
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration from string")?;

        Ok(config)
    }

    /// Figment over a YAML document with every mapping key folded to lower case.
    ///
    /// Folding lets the upper-case template keys and the lower-cased
    /// environment keys land on the same field.
    fn file_figment(yaml_content: &str) -> Result<Figment, ConfigError> {
        let document: Value =
            serde_yaml::from_str(yaml_content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let document = match fold_keys(document) {
            Value::Null => Value::Mapping(Mapping::new()),
            mapping @ Value::Mapping(_) => mapping,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "expected a mapping at the top level, found {:?}",
                    other
                )))
            }
        };

        Ok(Figment::from(Serialized::defaults(document)))
    }

    /// Layer `INVENTORY_*` overrides on top of the file
    fn with_env(figment: Figment) -> Figment {
        let env = Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR);
        let mut figment = figment.merge(env.clone().ignore(&IDENTIFIER_KEYS));

        // Identifiers stay strings even when they are all digits
        for (key, value) in env.only(&IDENTIFIER_KEYS).iter() {
            let key = key.as_str().to_ascii_lowercase();
            debug!(key = %key, "identifier overridden from environment");
            figment = figment.merge(Serialized::default(&key, value));
        }

        figment
    }

    /// Load configuration and require the identifiers to be set
    pub fn load_validated<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config = Self::load(config_path)?;
        ConfigValidator::validate_required(&config)?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to the template
    pub fn load_or_template<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            Self::load(config_path)
        } else {
            info!(path = %config_path.display(), "No configuration file, using template");
            Ok(Config::template())
        }
    }

    /// Render the template configuration as commented YAML
    pub fn example_yaml() -> Result<String> {
        let yaml_content = serde_yaml::to_string(&Config::template())
            .context("Failed to serialize template configuration")?;
        Ok(format!("{}{}", EXAMPLE_HEADER, yaml_content))
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml_content = Self::example_yaml()?;

        std::fs::write(path, yaml_content)
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
            .context("Failed to write example configuration file")?;

        info!(path = %path.display(), "Wrote example configuration");
        Ok(())
    }
}

fn fold_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::String(key) => Value::String(key.to_ascii_lowercase()),
                        other => other,
                    };
                    (key, fold_keys(value))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}
