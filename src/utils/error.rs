//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the policy dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open dataset {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Errors raised when a column fails its type-coercion precondition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("Row {row}, column '{column}': missing value")]
    MissingValue { row: usize, column: &'static str },

    #[error("Row {row}, column '{column}': {value} is not an integer (remainder {remainder})")]
    NonIntegral {
        row: usize,
        column: &'static str,
        value: f64,
        remainder: f64,
    },

    #[error("Row {row}, column '{column}': cannot parse date '{value}'")]
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}, column '{column}': {value} is out of range")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
    },
}

impl NormalizationError {
    /// Column that failed coercion
    pub fn column(&self) -> &'static str {
        match self {
            Self::MissingValue { column, .. }
            | Self::NonIntegral { column, .. }
            | Self::InvalidDate { column, .. }
            | Self::OutOfRange { column, .. } => column,
        }
    }
}

/// Errors that can occur while loading analysis configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Config TOML serialization error: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid report JSON in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
