//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FincrError, Result};

/// Main configuration for fincr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FincrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// How the single total amount is chosen from the amount candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalStrategy {
    /// Largest candidate, regardless of which pattern found it.
    #[default]
    Maximum,
    /// Largest candidate that followed a total label ("итого", "к оплате", ...),
    /// falling back to the largest candidate overall.
    PreferLabeled,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Strategy for selecting the total amount.
    pub total_strategy: TotalStrategy,

    /// Wrap results in a report with raw text and warnings.
    pub include_report: bool,
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON document.
    #[default]
    Json,
    /// Single-row CSV with a header.
    Csv,
    /// Plain text summary.
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

impl FincrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            FincrError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => Err(FincrError::Config(format!(
                "config file not found: {}",
                path.display()
            ))),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FincrConfig =
            serde_json::from_str(r#"{"extraction": {"total_strategy": "prefer_labeled"}}"#).unwrap();

        assert_eq!(config.extraction.total_strategy, TotalStrategy::PreferLabeled);
        assert!(!config.extraction.include_report);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FincrConfig::default();
        config.output.format = OutputFormat::Csv;
        config.save(&path).unwrap();

        let loaded = FincrConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = FincrConfig::load_or_default(Some(Path::new("/nonexistent/fincr.json")));
        assert!(matches!(result, Err(FincrError::Config(_))));

        assert_eq!(FincrConfig::load_or_default(None).unwrap(), FincrConfig::default());
    }
}
