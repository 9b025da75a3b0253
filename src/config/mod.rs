pub mod roster_config;

#[cfg(feature = "cli")]
use crate::core::report::ReportFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hospital-registry")]
#[command(about = "Register doctors and patients, book appointments, print the listings")]
pub struct CliConfig {
    /// TOML roster to load; the built-in demo roster is used when omitted
    #[arg(short, long)]
    pub roster: Option<String>,

    /// Append registry events to this log file
    #[arg(long)]
    pub log_file: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Warn and skip duplicate IDs instead of failing
    #[arg(long)]
    pub lenient: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(roster) = &self.roster {
            validate_path("roster", roster)?;
        }
        if let Some(log_file) = &self.log_file {
            validate_path("log_file", log_file)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_defaults() {
        let config = CliConfig::parse_from(["hospital-registry"]);
        assert!(config.roster.is_none());
        assert_eq!(config.format, ReportFormat::Text);
        assert!(!config.lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "hospital-registry",
            "--roster",
            "roster.toml",
            "--log-file",
            "hospital.log",
            "--format",
            "csv",
            "--lenient",
        ]);
        assert_eq!(config.roster.as_deref(), Some("roster.toml"));
        assert_eq!(config.format, ReportFormat::Csv);
        assert!(config.lenient);
    }

    #[test]
    fn test_empty_log_path_rejected() {
        let config = CliConfig::parse_from(["hospital-registry", "--log-file", ""]);
        assert!(config.validate().is_err());
    }
}
