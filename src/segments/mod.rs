//! Segment analysis: per-dimension loss ratios and opportunity detection.
//!
//! This module runs the configured grouping dimensions over normalized
//! records, applies the sample-size and loss-ratio thresholds, and produces
//! the analysis report.
//!
//! # Example
//! ```ignore
//! use loss_ratio_studio::segments::{build_report, load_config};
//!
//! let config = load_config("analysis.toml")?;
//! let report = build_report("policies.csv", &records, &config);
//! for (dimension, group) in report.opportunities() {
//!     println!("{dimension}: {} ({:.3})", group.label(), group.loss_ratio);
//! }
//! ```

mod engine;
mod schema;
mod threshold;

// Public API exports
pub use engine::{analyze_dimension, build_report};
pub use schema::{AnalysisReport, DimensionReport};
pub use threshold::{
    config_to_toml, load_config, validate_config, AnalysisConfig, DimensionConfig, SegmentFilter,
};

#[cfg(test)]
mod tests;
