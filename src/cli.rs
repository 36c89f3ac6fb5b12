//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Oncostat - Korean cancer-incidence statistics pipeline
///
/// Collects the national cancer statistics tables, analyzes them, and
/// renders JSON/text reports plus SVG charts and an HTML dashboard.
///
/// Examples:
///   oncostat
///   oncostat --offline --year 2020
///   oncostat --api-key YOUR_KEY --reports-dir out/reports
///   oncostat --skip-charts
///   oncostat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Reporting year to collect and analyze
    ///
    /// Defaults to the year in .oncostat.toml (2020 when unconfigured).
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<u16>,

    /// Skip the live API entirely and use the bundled reference tables
    #[arg(long)]
    pub offline: bool,

    /// Directory for the collected CSV tables
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for the JSON and text reports
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Directory for the SVG charts and dashboard
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Skip chart and dashboard rendering
    #[arg(long)]
    pub skip_charts: bool,

    /// Base URL of the statistics API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// API service key for the statistics service
    ///
    /// Without a key the pipeline falls back to bundled reference data.
    #[arg(long, env = "CANCER_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .oncostat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .oncostat.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(year) = self.year {
            if !(1990..=2100).contains(&year) {
                return Err("Year must be between 1990 and 2100".to_string());
            }
        }

        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
