//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;
mod output;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use fincr_core::{
    FincrConfig, PlainTextRecognizer, TextRecognizer, TotalStrategy, VisionResponseRecognizer,
};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fincr")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FincrConfig> {
    if let Some(path) = config_path {
        return Ok(FincrConfig::load_or_default(Some(Path::new(path)))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(FincrConfig::from_file(&default_path)?)
    } else {
        Ok(FincrConfig::default())
    }
}

/// How input payloads are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Decide by file extension (.json is a recognizer response, anything else text)
    Auto,
    /// Plain recognized text
    Text,
    /// Saved cloud OCR recognizeText JSON response
    VisionJson,
}

impl InputFormat {
    /// Resolve `Auto` against a file path.
    pub fn resolve(self, path: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .and_then(|p| p.extension())
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::VisionJson
                } else {
                    InputFormat::Text
                }
            }
            other => other,
        }
    }

    /// Recognizer reading payloads of this format.
    pub fn recognizer(self, path: Option<&Path>) -> Box<dyn TextRecognizer> {
        match self.resolve(path) {
            InputFormat::VisionJson => Box::new(VisionResponseRecognizer),
            _ => Box::new(PlainTextRecognizer),
        }
    }
}

/// Total amount strategy as a command-line value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Largest amount found anywhere
    Maximum,
    /// Largest amount after a total label, falling back to the largest overall
    PreferLabeled,
}

impl From<StrategyArg> for TotalStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Maximum => TotalStrategy::Maximum,
            StrategyArg::PreferLabeled => TotalStrategy::PreferLabeled,
        }
    }
}

pub use output::{format_report, format_result, FormatArg};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_resolution() {
        assert_eq!(
            InputFormat::Auto.resolve(Some(Path::new("scan.JSON"))),
            InputFormat::VisionJson
        );
        assert_eq!(InputFormat::Auto.resolve(Some(Path::new("scan.txt"))), InputFormat::Text);
        assert_eq!(InputFormat::Auto.resolve(None), InputFormat::Text);
        assert_eq!(
            InputFormat::Text.resolve(Some(Path::new("scan.json"))),
            InputFormat::Text
        );
    }

    #[test]
    fn test_strategy_conversion() {
        assert_eq!(TotalStrategy::from(StrategyArg::PreferLabeled), TotalStrategy::PreferLabeled);
    }
}
