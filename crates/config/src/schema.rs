//! Configuration schema definitions

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use types::utils::PLACEHOLDER_EMAIL;
use types::Environment;

/// Main configuration structure
///
/// Every field falls back to the shipped template value, so a partial
/// YAML file only needs the identifiers. Upper-case key names such as
/// `FORM_ID` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Google Form ID (found in the form URL)
    #[serde(alias = "FORM_ID")]
    pub form_id: String,
    /// Google Spreadsheet ID (found in the spreadsheet URL)
    #[serde(alias = "SPREADSHEET_ID")]
    pub spreadsheet_id: String,
    /// Deployment environment
    #[serde(alias = "ENVIRONMENT")]
    pub environment: Environment,
    /// Feature flags
    #[serde(alias = "FEATURES")]
    pub features: FeatureFlags,
    /// Recipient for notifications, used only when email notifications are enabled
    #[serde(alias = "NOTIFICATION_EMAIL")]
    pub notification_email: String,
    /// Locale and display settings
    #[serde(alias = "SYSTEM")]
    pub system: SystemSettings,
}

/// Feature flags for optional behavior of the host workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Sync form responses into the spreadsheet automatically
    #[serde(alias = "AUTO_SYNC")]
    pub auto_sync: bool,
    /// Send notification emails
    #[serde(alias = "EMAIL_NOTIFICATIONS")]
    pub email_notifications: bool,
    /// Verbose logging in the host workflow
    #[serde(alias = "ADVANCED_LOGGING")]
    pub advanced_logging: bool,
}

/// System settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// IANA timezone name
    #[serde(alias = "DEFAULT_TIMEZONE")]
    pub default_timezone: String,
    /// Date pattern in `yyyy-MM-dd` notation
    #[serde(alias = "DATE_FORMAT")]
    pub date_format: String,
    /// Fractional digits for numeric display
    #[serde(alias = "DECIMAL_PLACES")]
    pub decimal_places: u8,
}

// Default value functions
fn default_form_id() -> String {
    "YOUR_FORM_ID_HERE".to_string()
}

fn default_spreadsheet_id() -> String {
    "YOUR_SPREADSHEET_ID_HERE".to_string()
}

fn default_notification_email() -> String {
    PLACEHOLDER_EMAIL.to_string()
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_date_format() -> String {
    "yyyy-MM-dd".to_string()
}

fn default_decimal_places() -> u8 {
    2
}

impl Config {
    /// The configuration as shipped in the template, placeholders included
    pub fn template() -> Self {
        Self::default()
    }

    /// Template configuration with the two identifiers filled in
    pub fn with_ids(form_id: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }

    /// Value of a required identifier by field name
    pub fn required_value(&self, field: &str) -> Option<&str> {
        match field {
            "form_id" => Some(&self.form_id),
            "spreadsheet_id" => Some(&self.spreadsheet_id),
            _ => None,
        }
    }

    /// Whether notifications should actually be sent
    pub fn notifications_active(&self) -> bool {
        self.features.email_notifications && !self.notification_email.is_empty()
    }
}

impl FeatureFlags {
    /// Flag names in declaration order
    pub const NAMES: [&'static str; 3] = ["auto_sync", "email_notifications", "advanced_logging"];

    /// Look up a flag by name; accepts snake_case and upper-case names
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        match name.to_ascii_lowercase().as_str() {
            "auto_sync" => Some(self.auto_sync),
            "email_notifications" => Some(self.email_notifications),
            "advanced_logging" => Some(self.advanced_logging),
            _ => None,
        }
    }

    /// `(name, enabled)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            (Self::NAMES[0], self.auto_sync),
            (Self::NAMES[1], self.email_notifications),
            (Self::NAMES[2], self.advanced_logging),
        ]
        .into_iter()
    }
}

impl SystemSettings {
    /// Render a number with the configured precision
    pub fn format_decimal(&self, value: f64) -> String {
        format!("{:.*}", usize::from(self.decimal_places), value)
    }

    /// Whether the date pattern contains at least one date token
    pub fn has_date_tokens(&self) -> bool {
        self.date_format.chars().any(|c| matches!(c, 'y' | 'M' | 'd'))
    }

    /// Render a date with the configured pattern.
    ///
    /// Supported tokens are `yyyy`, `yy`, `MMMM`, `MMM`, `MM`, `M`, `dd` and
    /// `d`; every other character is copied through unchanged.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.date_format.len() + 4);
        let mut chars = self.date_format.chars().peekable();

        while let Some(c) = chars.next() {
            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            match (c, run) {
                ('y', 2) => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
                ('y', _) => out.push_str(&format!("{:04}", date.year())),
                ('M', 1) => out.push_str(&date.month().to_string()),
                ('M', 2) => out.push_str(&format!("{:02}", date.month())),
                ('M', 3) => out.push_str(&date.format("%b").to_string()),
                ('M', _) => out.push_str(&date.format("%B").to_string()),
                ('d', 1) => out.push_str(&date.day().to_string()),
                ('d', _) => out.push_str(&format!("{:02}", date.day())),
                _ => (0..run).for_each(|_| out.push(c)),
            }
        }

        out
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            spreadsheet_id: default_spreadsheet_id(),
            environment: Environment::Development,
            features: FeatureFlags::default(),
            notification_email: default_notification_email(),
            system: SystemSettings::default(),
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            auto_sync: true,
            email_notifications: false,
            advanced_logging: true,
        }
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
            date_format: default_date_format(),
            decimal_places: default_decimal_places(),
        }
    }
}
