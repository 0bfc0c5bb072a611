//! Chemical inventory configuration tool - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigHandle, ConfigLoader};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Command, LogFormat};

fn main() -> Result<ExitCode> {
    // Load .env before parsing so CONFIG_PATH and LOG_FORMAT can come from it
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    match dotenv_result {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    let mut stdout = io::stdout().lock();

    let code = match cli.command {
        Command::Init { path, force } => {
            commands::init(&path, force, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Show { format } => {
            let handle = load_handle(&cli.config)?;
            let today = chrono::Local::now().date_naive();
            commands::show(&handle, format, today, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Validate { strict } => {
            let handle = load_handle(&cli.config)?;
            if commands::validate(&handle, strict, &mut stdout)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Features => {
            let handle = load_handle(&cli.config)?;
            commands::features(&handle, &mut stdout)?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

/// Build the shared configuration once for the command to borrow
fn load_handle(path: &Path) -> Result<ConfigHandle> {
    let config = ConfigLoader::load_or_template(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    let handle = ConfigHandle::new(config);
    info!(environment = %handle.environment, "Configuration ready");
    Ok(handle)
}

/// Initialize logging on stderr, keeping stdout for command output
fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    Ok(())
}
