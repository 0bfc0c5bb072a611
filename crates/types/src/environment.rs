//! Deployment environment of the host workflow

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment the inventory system runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development setup
    #[default]
    #[serde(alias = "DEVELOPMENT", alias = "Development")]
    Development,
    /// Live setup
    #[serde(alias = "PRODUCTION", alias = "Production")]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" PRODUCTION ".parse::<Environment>().unwrap(), Environment::Production);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(err.field(), Some("environment"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Environment::Production).unwrap(), "\"production\"");
        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(env, Environment::Development);
        assert_eq!(Environment::default(), Environment::Development);
        assert!(!env.is_production());
    }
}
