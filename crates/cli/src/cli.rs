//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect, validate and scaffold the chemical inventory configuration
#[derive(Debug, Parser)]
#[command(name = "inventory-config", version, about)]
pub struct Cli {
    /// Configuration file; the template is used when it does not exist
    #[arg(short, long, env = "CONFIG_PATH", default_value = "inventory.yaml", global = true)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the effective configuration
    Show {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Check that the configuration is ready for use
    Validate {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
    /// List feature flags
    Features,
    /// Write the configuration template
    Init {
        /// Destination file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["inventory-config", "show", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Show { format: OutputFormat::Json }));
    }

    #[test]
    fn test_parse_validate_with_global_config() {
        let cli = Cli::try_parse_from([
            "inventory-config",
            "validate",
            "--strict",
            "--config",
            "lab.yaml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Validate { strict: true }));
        assert_eq!(cli.config, PathBuf::from("lab.yaml"));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["inventory-config", "init", "out.yaml", "--force"]).unwrap();
        match cli.command {
            Command::Init { path, force } => {
                assert_eq!(path, PathBuf::from("out.yaml"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["inventory-config"]).is_err());
    }
}
