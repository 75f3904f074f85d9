//! Loss Ratio Studio
//!
//! Loss-ratio segmentation of motor insurance policy portfolios.
//!
//! This crate provides the core implementation for the
//! `loss-ratio` CLI tool: loading a policy dataset, normalizing its
//! columns, computing loss ratios, and finding segments whose aggregate
//! loss ratio sits below a ceiling.
//!
//! ## Getting Started
//!
//! ```bash
//! loss-ratio analyze --input policies.csv --output report.json
//! loss-ratio --help
//! ```
//!
//! ## Pipeline
//!
//! ```ignore
//! use loss_ratio_studio::parser::{load_dataset, normalize};
//! use loss_ratio_studio::segments::{build_report, AnalysisConfig};
//!
//! let raw = load_dataset("policies.csv")?;
//! let records = normalize(&raw)?;
//! let report = build_report("policies.csv", &records, &AnalysisConfig::default());
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod segments;
pub mod utils;

#[cfg(test)]
mod test_support;
