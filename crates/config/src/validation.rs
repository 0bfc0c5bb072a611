//! Configuration validation utilities

use crate::schema::Config;
use std::fmt;
use tracing::{debug, info, warn};
use types::utils::{is_placeholder, is_unset, is_valid_email, looks_like_iana_timezone, PLACEHOLDER_EMAIL};
use types::ConfigError;

/// Identifiers that must be replaced before the configuration is used
pub const REQUIRED_FIELDS: [&str; 2] = ["form_id", "spreadsheet_id"];

const MAX_DECIMAL_PLACES: u8 = 10;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Fail fast when a required identifier is empty or still a placeholder.
    ///
    /// Fields are checked in [`REQUIRED_FIELDS`] order and the first unset
    /// one is reported. Nothing calls this implicitly; callers opt in.
    pub fn validate_required(config: &Config) -> Result<bool, ConfigError> {
        for field in REQUIRED_FIELDS {
            let value = config.required_value(field).unwrap_or_default();
            if is_unset(value) {
                debug!(field, "required field is unset");
                return Err(ConfigError::Unset {
                    field: field.to_string(),
                });
            }
        }

        info!("Configuration validated successfully");
        Ok(true)
    }

    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_identifiers(config, &mut report);
        Self::validate_notifications(config, &mut report);
        Self::validate_system(config, &mut report);
        Self::validate_environment(config, &mut report);

        for issue in report.warnings() {
            warn!(field = %issue.field, "{}", issue.message);
        }
        debug!("{}", report.summary());

        report
    }

    fn validate_identifiers(config: &Config, report: &mut ValidationReport) {
        for field in REQUIRED_FIELDS {
            let value = config.required_value(field).unwrap_or_default();
            if value.is_empty() {
                report.error(field, "Value cannot be empty");
            } else if is_placeholder(value) {
                report.error(field, format!("Placeholder value '{}' must be replaced", value));
            } else if value.trim() != value {
                report.warning(field, "Value has leading or trailing whitespace");
            }
        }

        if !config.form_id.is_empty() && config.form_id == config.spreadsheet_id {
            report.warning("spreadsheet_id", "Spreadsheet ID is identical to form ID");
        }
    }

    fn validate_notifications(config: &Config, report: &mut ValidationReport) {
        let email = config.notification_email.as_str();
        let placeholder = email == PLACEHOLDER_EMAIL || is_placeholder(email);

        if config.features.email_notifications {
            if email.is_empty() {
                report.error("notification_email", "Email notifications are enabled but no address is set");
            } else if placeholder {
                report.error("notification_email", "Email notifications are enabled but the address is still the template placeholder");
            } else if !is_valid_email(email) {
                report.error("notification_email", format!("Invalid email address: {}", email));
            }
        } else if placeholder {
            report.warning("notification_email", "Address is still the template placeholder");
        }
    }

    fn validate_system(config: &Config, report: &mut ValidationReport) {
        let system = &config.system;

        if system.default_timezone.is_empty() {
            report.error("system.default_timezone", "Timezone cannot be empty");
        } else if !looks_like_iana_timezone(&system.default_timezone) {
            report.warning(
                "system.default_timezone",
                format!("'{}' does not look like an IANA timezone name", system.default_timezone),
            );
        }

        if system.date_format.is_empty() {
            report.error("system.date_format", "Date format cannot be empty");
        } else if !system.has_date_tokens() {
            report.error(
                "system.date_format",
                format!("Date format '{}' contains no date tokens", system.date_format),
            );
        }

        if system.decimal_places > MAX_DECIMAL_PLACES {
            report.warning(
                "system.decimal_places",
                format!("Decimal places is very high ({})", system.decimal_places),
            );
        }
    }

    fn validate_environment(config: &Config, report: &mut ValidationReport) {
        if config.environment.is_production() && config.features.advanced_logging {
            report.warning("features.advanced_logging", "Advanced logging is enabled in production");
        }
    }
}

/// How serious a validation issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration must not be used as is
    Error,
    /// Usable, but probably not what was intended
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single finding against one configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

/// Findings of a full validation pass, in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, field: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.push(Severity::Error, field, message);
    }

    pub fn warning(&mut self, field: &str, message: impl Into<String>) {
        self.push(Severity::Warning, field, message);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Whether any issue refers to `field`
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// One-line overview naming the affected fields,
    /// e.g. `2 errors (form_id, spreadsheet_id); 0 warnings`
    pub fn summary(&self) -> String {
        let describe = |severity: Severity, noun: &str| {
            let fields: Vec<&str> = self.with_severity(severity).map(|i| i.field.as_str()).collect();
            let plural = if fields.len() == 1 { "" } else { "s" };
            if fields.is_empty() {
                format!("0 {}s", noun)
            } else {
                format!("{} {}{} ({})", fields.len(), noun, plural, fields.join(", "))
            }
        };

        format!("{}; {}", describe(Severity::Error, "error"), describe(Severity::Warning, "warning"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    struct BufWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for BufWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records formatted events
    fn capture_logs<F: FnOnce()>(f: F) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || BufWriter(writer.clone()))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let output = buffer.lock().unwrap();
        String::from_utf8_lossy(&output).into_owned()
    }

    fn configured() -> Config {
        let mut config = Config::with_ids("1a2b3c", "xyz789");
        config.notification_email = "lab-manager@chem.example.org".to_string();
        config
    }

    #[test]
    fn test_placeholder_form_id_rejected() {
        let config = Config::with_ids("YOUR_FORM_ID_HERE", "abc123");
        let err = ConfigValidator::validate_required(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Unset { ref field } if field == "form_id"));
        assert!(err.to_string().contains("form_id"));
    }

    #[test]
    fn test_real_ids_accepted() {
        let config = Config::with_ids("1a2b3c", "xyz789");
        assert!(ConfigValidator::validate_required(&config).unwrap());
    }

    #[test]
    fn test_empty_form_id_rejected() {
        let config = Config::with_ids("", "xyz789");
        let err = ConfigValidator::validate_required(&config).unwrap_err();
        assert_eq!(err.field(), Some("form_id"));
    }

    #[test]
    fn test_each_marker_rejected_for_each_field() {
        for bad in ["", "YOUR_ID", "ID_HERE", "YOUR_SPREADSHEET_ID_HERE"] {
            let config = Config::with_ids(bad, "xyz789");
            let err = ConfigValidator::validate_required(&config).unwrap_err();
            assert_eq!(err.field(), Some("form_id"), "form_id={:?}", bad);

            let config = Config::with_ids("1a2b3c", bad);
            let err = ConfigValidator::validate_required(&config).unwrap_err();
            assert_eq!(err.field(), Some("spreadsheet_id"), "spreadsheet_id={:?}", bad);
        }
    }

    #[test]
    fn test_first_unset_field_reported() {
        let err = ConfigValidator::validate_required(&Config::template()).unwrap_err();
        assert_eq!(err.field(), Some("form_id"));
    }

    #[test]
    fn test_template_report() {
        let report = ConfigValidator::validate(&Config::template());
        assert!(!report.is_valid());
        let fields: Vec<_> = report.errors().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["form_id", "spreadsheet_id"]);
        assert!(report.warnings().any(|i| i.field == "notification_email"));
    }

    #[test]
    fn test_clean_report() {
        let report = ConfigValidator::validate(&configured());
        assert!(report.is_valid());
        assert!(!report.has_warnings(), "{:?}", report.issues());
        assert_eq!(report.summary(), "0 errors; 0 warnings");
    }

    #[test]
    fn test_notifications_need_real_address() {
        let mut config = Config::with_ids("1a2b3c", "xyz789");
        config.features.email_notifications = true;
        let report = ConfigValidator::validate(&config);
        assert!(report.errors().any(|i| i.field == "notification_email"));

        config.notification_email = "not-an-email".to_string();
        let report = ConfigValidator::validate(&config);
        assert!(report.errors().any(|i| i.message.contains("Invalid email")));

        config.notification_email = "lab-manager@chem.example.org".to_string();
        assert!(ConfigValidator::validate(&config).is_valid());
    }

    #[test]
    fn test_system_settings_checks() {
        let mut config = configured();
        config.system.date_format = "--".to_string();
        config.system.default_timezone = "CST".to_string();
        config.system.decimal_places = 12;

        let report = ConfigValidator::validate(&config);
        assert!(report.errors().any(|i| i.field == "system.date_format"));
        assert!(report.warnings().any(|i| i.field == "system.default_timezone"));
        assert!(report.warnings().any(|i| i.field == "system.decimal_places"));
    }

    #[test]
    fn test_production_advanced_logging_warning() {
        let mut config = configured();
        config.environment = types::Environment::Production;
        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
        assert!(report.warnings().any(|i| i.field == "features.advanced_logging"));
    }

    #[test]
    fn test_success_is_logged() {
        let config = Config::with_ids("1a2b3c", "xyz789");
        let logs = capture_logs(|| {
            assert!(ConfigValidator::validate_required(&config).unwrap());
        });
        assert!(logs.contains("INFO"), "{}", logs);
        assert!(logs.contains("Configuration validated successfully"), "{}", logs);
    }

    #[test]
    fn test_failure_is_not_logged_as_success() {
        let logs = capture_logs(|| {
            assert!(ConfigValidator::validate_required(&Config::template()).is_err());
        });
        assert!(!logs.contains("Configuration validated successfully"), "{}", logs);
    }

    #[test]
    fn test_summary_names_fields() {
        let report = ConfigValidator::validate(&Config::template());
        assert_eq!(
            report.summary(),
            "2 errors (form_id, spreadsheet_id); 1 warning (notification_email)"
        );
        assert!(report.mentions("notification_email"));
        assert!(!report.mentions("system.date_format"));
    }

    #[test]
    fn test_issue_display() {
        let mut report = ValidationReport::new();
        report.error("form_id", "Value cannot be empty");
        report.warning("system.decimal_places", "Decimal places is very high (12)");

        let lines: Vec<String> = report.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "error: form_id: Value cannot be empty",
                "warning: system.decimal_places: Decimal places is very high (12)",
            ]
        );
        assert!(report.has_errors() && report.has_warnings());
    }
}
