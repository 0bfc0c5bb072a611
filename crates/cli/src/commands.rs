//! Subcommand implementations
//!
//! Each command writes its human-facing output to the given writer so the
//! binary can pass stdout and the tests a buffer.

use crate::cli::OutputFormat;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use config::{Config, ConfigHandle, ConfigLoader, ConfigValidator};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

const SAMPLE_QUANTITY: f64 = 1234.5678;

/// Print the configuration
pub fn show<W: Write>(handle: &ConfigHandle, format: OutputFormat, today: NaiveDate, out: &mut W) -> Result<()> {
    let config = handle.get_config();

    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration as YAML")?;
            write!(out, "{}", yaml)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config).context("Failed to serialize configuration as JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Summary => write_summary(config, today, out)?,
    }

    Ok(())
}

fn write_summary<W: Write>(config: &Config, today: NaiveDate, out: &mut W) -> Result<()> {
    let system = &config.system;

    writeln!(out, "Environment:     {}", config.environment)?;
    writeln!(out, "Form ID:         {}", config.form_id)?;
    writeln!(out, "Spreadsheet ID:  {}", config.spreadsheet_id)?;
    if config.notifications_active() {
        writeln!(out, "Notifications:   {}", config.notification_email)?;
    } else {
        writeln!(out, "Notifications:   off")?;
    }
    writeln!(out, "Timezone:        {}", system.default_timezone)?;
    writeln!(out, "Date format:     {} (today: {})", system.date_format, system.format_date(today))?;
    writeln!(
        out,
        "Decimal places:  {} (e.g. {})",
        system.decimal_places,
        system.format_decimal(SAMPLE_QUANTITY)
    )?;

    Ok(())
}

/// Run the required-field check and the full report.
///
/// Returns whether the configuration passed.
pub fn validate<W: Write>(handle: &ConfigHandle, strict: bool, out: &mut W) -> Result<bool> {
    match handle.validate_config() {
        Ok(_) => writeln!(out, "Required fields: ok")?,
        Err(e) => writeln!(out, "Required fields: {}", e)?,
    }

    let report = ConfigValidator::validate(handle.get_config());

    for issue in report.issues() {
        writeln!(out, "{}", issue)?;
    }
    writeln!(out, "Validation: {}", report.summary())?;

    let passed = report.is_valid() && !(strict && report.has_warnings());
    if passed {
        info!("Configuration is ready for use");
    } else {
        warn!(strict, "Configuration is not ready for use");
    }

    Ok(passed)
}

/// List feature flags
pub fn features<W: Write>(handle: &ConfigHandle, out: &mut W) -> Result<()> {
    let config = handle.get_config();

    for (name, enabled) in config.features.iter() {
        writeln!(out, "{:<20} {}", name, if enabled { "enabled" } else { "disabled" })?;
    }

    if config.features.email_notifications {
        writeln!(out, "notifications go to {}", config.notification_email)?;
    }

    Ok(())
}

/// Write the configuration template
pub fn init<W: Write>(path: &Path, force: bool, out: &mut W) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }

    ConfigLoader::create_example(path)?;
    writeln!(out, "Wrote configuration template to {}", path.display())?;
    writeln!(out, "Replace form_id and spreadsheet_id before use.")?;

    Ok(())
}
