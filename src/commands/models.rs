use crate::aggregator::DivisionAnomaly;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Policy dataset (CSV)
    pub input: PathBuf,

    /// Analysis configuration (TOML); built-in dimensions when absent
    pub config: Option<PathBuf>,

    /// Output path for the JSON report (optional)
    pub output: Option<PathBuf>,

    /// Overrides the configured loss-ratio ceiling
    pub max_loss_ratio: Option<f64>,

    /// Print portfolio totals and data quality diagnostics
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("policies.csv"),
            config: None,
            output: None,
            max_loss_ratio: None,
            print_summary: false,
        }
    }
}

/// Data quality findings of the check command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Holder birth years before the cutoff, with policy counts
    pub birth_year_outliers: BTreeMap<i32, usize>,

    /// Policies with a non-finite loss ratio
    pub anomalies: Vec<DivisionAnomaly>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.birth_year_outliers.is_empty() && self.anomalies.is_empty()
    }
}
