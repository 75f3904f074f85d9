//! Core segment engine implementation.
//! Runs every configured dimension over the normalized records and builds
//! the analysis report.

use super::schema::{AnalysisReport, DimensionReport};
use super::threshold::{AnalysisConfig, DimensionConfig};
use crate::aggregator::{aggregate, birth_year_outliers, find_division_anomalies, summarize_portfolio};
use crate::parser::PolicyRecord;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;
use std::path::Path;

/// Aggregate one dimension and apply its filters
///
/// Aggregation always runs over the full record set; both filters are views
/// over the finished groups, so an opportunity may come from a group too
/// small for the overview table.
pub fn analyze_dimension(
    records: &[PolicyRecord],
    dimension: &DimensionConfig,
    max_loss_ratio: f64,
) -> DimensionReport {
    let all_groups = aggregate(records, &dimension.keys);
    let groups = dimension.overview_filter().apply(&all_groups);

    let opportunities = dimension
        .opportunities
        .then(|| dimension.opportunity_filter(max_loss_ratio).apply(&all_groups));

    debug!(
        "Dimension '{}': {} groups, {} kept, {} opportunities",
        dimension.name,
        all_groups.len(),
        groups.len(),
        opportunities.as_ref().map_or(0, Vec::len)
    );

    DimensionReport {
        name: dimension.name.clone(),
        keys: dimension.keys.iter().map(|k| k.name().to_string()).collect(),
        min_policies: dimension.min_policies,
        opportunity_min_policies: dimension.opportunity_floor(),
        excluded_groups: all_groups.len() - groups.len(),
        groups,
        opportunities,
    }
}

/// Build a complete analysis report
///
/// # Arguments
/// * `source` - Dataset path, recorded in the report
/// * `records` - Normalized policy records
/// * `config` - Dimensions and thresholds
///
/// # Example
/// ```ignore
/// let raw = load_dataset("policies.csv")?;
/// let records = normalize(&raw)?;
/// let report = build_report("policies.csv", &records, &AnalysisConfig::default());
/// ```
pub fn build_report(source: impl AsRef<Path>, records: &[PolicyRecord], config: &AnalysisConfig) -> AnalysisReport {
    let dimensions = config
        .dimensions
        .iter()
        .map(|dimension| analyze_dimension(records, dimension, config.max_loss_ratio))
        .collect();

    AnalysisReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.as_ref().display().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        max_loss_ratio: config.max_loss_ratio,
        portfolio: summarize_portfolio(records),
        anomalies: find_division_anomalies(records),
        birth_year_outliers: birth_year_outliers(records, config.birth_year_cutoff),
        dimensions,
    }
}
