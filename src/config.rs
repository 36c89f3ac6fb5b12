//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.oncostat.toml` files.

use crate::models::PopulationReference;
use crate::source::reference;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Statistics API settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output directory settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Regional population table used for per-100k incidence rates.
    /// Swap this table to analyze a different census year.
    #[serde(default = "default_population")]
    pub population: PopulationReference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            population: default_population(),
        }
    }
}

fn default_population() -> PopulationReference {
    reference::population()
}

/// Reporting dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Reporting year to collect and analyze.
    #[serde(default = "default_year")]
    pub year: u16,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
        }
    }
}

fn default_year() -> u16 {
    reference::REFERENCE_YEAR
}

/// Statistics API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the statistics service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// API service key. Also settable via the CANCER_API_KEY env var.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://www.cancer.go.kr/api".to_string()
}

fn default_timeout() -> u64 {
    15
}

/// Output directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the collected CSV tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory for the JSON and text reports.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,

    /// Directory for the SVG charts and dashboard.
    #[serde(default = "default_charts_dir")]
    pub charts_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            reports_dir: default_reports_dir(),
            charts_dir: default_charts_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

fn default_charts_dir() -> String {
    "charts".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".oncostat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(year) = args.year {
            self.dataset.year = year;
        }

        if let Some(ref url) = args.api_url {
            self.source.base_url = url.clone();
        }
        if let Some(ref key) = args.api_key {
            self.source.api_key = Some(key.clone());
        }
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(ref dir) = args.data_dir {
            self.output.data_dir = dir.display().to_string();
        }
        if let Some(ref dir) = args.reports_dir {
            self.output.reports_dir = dir.display().to_string();
        }
        if let Some(ref dir) = args.charts_dir {
            self.output.charts_dir = dir.display().to_string();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dataset.year, 2020);
        assert_eq!(config.source.base_url, "https://www.cancer.go.kr/api");
        assert_eq!(config.source.timeout_seconds, 15);
        assert_eq!(config.output.data_dir, "data");
        assert_eq!(config.population.len(), 17);
        assert_eq!(config.population.get("서울특별시"), Some(9720846));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[dataset]
year = 1999

[source]
timeout_seconds = 30

[output]
data_dir = "out/data"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.dataset.year, 1999);
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.output.data_dir, "out/data");
        // Untouched sections keep their defaults, including the bundled
        // population table.
        assert_eq!(config.source.base_url, "https://www.cancer.go.kr/api");
        assert_eq!(config.population.len(), 17);
    }

    #[test]
    fn test_parse_custom_population() {
        let toml_content = r#"
[population]
"서울특별시" = 9500000
"부산광역시" = 3300000
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.population.len(), 2);
        assert_eq!(config.population.get("서울특별시"), Some(9500000));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[dataset]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[population]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.dataset.year, 2020);
        assert_eq!(parsed.population.len(), 17);
    }
}
