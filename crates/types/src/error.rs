//! Error types for the chemical inventory configuration

use thiserror::Error;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Required identifier is empty or still holds a template placeholder
    #[error("Configuration error: {field} must be set with actual value")]
    Unset { field: String },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Reading or writing a configuration file failed
    #[error("Configuration I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// The configuration field this error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Unset { field } | ConfigError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_message_names_field() {
        let err = ConfigError::Unset {
            field: "form_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: form_id must be set with actual value"
        );
        assert_eq!(err.field(), Some("form_id"));
    }

    #[test]
    fn test_field_is_none_for_file_errors() {
        let err = ConfigError::ParseError("bad yaml".to_string());
        assert_eq!(err.field(), None);
    }
}
