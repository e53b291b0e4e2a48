//! Data models for extraction results and configuration.

pub mod config;
pub mod document;

pub use config::{ExtractionConfig, FincrConfig, OutputConfig, OutputFormat, TotalStrategy};
pub use document::{DocumentType, ExtractionResult, ScanReport};
