//! Analysis report schema definitions.
//!
//! This is the structure of the JSON report written to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{DivisionAnomaly, GroupStats, PortfolioSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dataset the report was computed from
    pub source: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Loss-ratio ceiling used for opportunities
    pub max_loss_ratio: f64,

    /// Portfolio-wide totals
    pub portfolio: PortfolioSummary,

    /// Policies with a non-finite individual loss ratio
    pub anomalies: Vec<DivisionAnomaly>,

    /// Holder birth years before the cutoff, with policy counts
    pub birth_year_outliers: BTreeMap<i32, usize>,

    /// One entry per configured dimension, in configuration order
    pub dimensions: Vec<DimensionReport>,
}

/// Grouped loss ratios for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionReport {
    /// Dimension name from the configuration
    pub name: String,

    /// Grouping column names
    pub keys: Vec<String>,

    /// Minimum policies per group applied to `groups`
    pub min_policies: usize,

    /// Minimum policies per group applied to `opportunities`
    pub opportunity_min_policies: usize,

    /// Groups below `min_policies`, left out of `groups`
    pub excluded_groups: usize,

    /// Groups with enough policies, ascending loss ratio
    pub groups: Vec<GroupStats>,

    /// Groups also below the ceiling (None when the dimension is not searched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Vec<GroupStats>>,
}

impl AnalysisReport {
    /// All opportunities across dimensions as (dimension, group) pairs
    pub fn opportunities(&self) -> impl Iterator<Item = (&str, &GroupStats)> {
        self.dimensions.iter().flat_map(|dimension| {
            dimension
                .opportunities
                .iter()
                .flatten()
                .map(move |group| (dimension.name.as_str(), group))
        })
    }

    /// Find a dimension by name
    pub fn dimension(&self, name: &str) -> Option<&DimensionReport> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}
