//! Segment thresholds and analysis configuration.
//!
//! Loads the analysis configuration from TOML and applies the two segment
//! predicates (minimum policy count, loss-ratio ceiling) to aggregated groups.

use crate::aggregator::GroupStats;
use crate::parser::CategoricalColumn;
use crate::utils::config::{DEFAULT_BIRTH_YEAR_CUTOFF, DEFAULT_MAX_LOSS_RATIO};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Opportunities must have a loss ratio strictly below this ceiling
    #[serde(default = "default_max_loss_ratio")]
    pub max_loss_ratio: f64,

    /// Birth years before this are flagged by the data quality check
    #[serde(default = "default_birth_year_cutoff")]
    pub birth_year_cutoff: i32,

    /// Grouping dimensions, analyzed in order
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<DimensionConfig>,
}

/// One grouping dimension
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DimensionConfig {
    /// Display name (e.g. "region")
    pub name: String,

    /// Grouping columns, outermost first
    pub keys: Vec<CategoricalColumn>,

    /// Groups with fewer policies are dropped (a group with exactly this many is kept)
    #[serde(default)]
    pub min_policies: usize,

    /// Whether this dimension is searched for opportunities
    #[serde(default = "default_opportunities")]
    pub opportunities: bool,

    /// Size floor for opportunities, when it differs from `min_policies`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_min_policies: Option<usize>,
}

impl DimensionConfig {
    pub fn new(name: &str, keys: &[CategoricalColumn], min_policies: usize, opportunities: bool) -> Self {
        Self {
            name: name.to_string(),
            keys: keys.to_vec(),
            min_policies,
            opportunities,
            opportunity_min_policies: None,
        }
    }

    pub fn with_opportunity_min_policies(mut self, min_policies: usize) -> Self {
        self.opportunity_min_policies = Some(min_policies);
        self
    }

    /// Effective size floor of the opportunity listing
    pub fn opportunity_floor(&self) -> usize {
        self.opportunity_min_policies.unwrap_or(self.min_policies)
    }

    /// Filter for the overview table: sample size only
    pub fn overview_filter(&self) -> SegmentFilter {
        SegmentFilter {
            min_policies: self.min_policies,
            max_loss_ratio: None,
        }
    }

    /// Filter for opportunities: sample size and ratio ceiling
    pub fn opportunity_filter(&self, max_loss_ratio: f64) -> SegmentFilter {
        SegmentFilter {
            min_policies: self.opportunity_floor(),
            max_loss_ratio: Some(max_loss_ratio),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_loss_ratio: default_max_loss_ratio(),
            birth_year_cutoff: default_birth_year_cutoff(),
            dimensions: default_dimensions(),
        }
    }
}

fn default_max_loss_ratio() -> f64 {
    DEFAULT_MAX_LOSS_RATIO
}

fn default_birth_year_cutoff() -> i32 {
    DEFAULT_BIRTH_YEAR_CUTOFF
}

fn default_opportunities() -> bool {
    true
}

/// Gender, region, region+city, bonus class and vehicle brand
fn default_dimensions() -> Vec<DimensionConfig> {
    use CategoricalColumn::*;

    vec![
        DimensionConfig::new("gender", &[Gender], 0, false),
        DimensionConfig::new("region", &[Region], 200, true),
        DimensionConfig::new("city", &[Region, City], 20_000, true).with_opportunity_min_policies(10_000),
        DimensionConfig::new("bonus_class", &[BonusClass], 0, false),
        DimensionConfig::new("vehicle_brand", &[VehicleBrand], 500, true),
    ]
}

/// Post-aggregation view over groups; both predicates must hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFilter {
    /// Inclusive lower bound on policy count
    pub min_policies: usize,

    /// Exclusive upper bound on loss ratio (None = no ceiling)
    pub max_loss_ratio: Option<f64>,
}

impl SegmentFilter {
    /// Check a single group. A NaN ratio never passes a ceiling.
    pub fn accepts(&self, group: &GroupStats) -> bool {
        let large_enough = group.policy_count >= self.min_policies;
        let below_ceiling = self
            .max_loss_ratio
            .map_or(true, |ceiling| group.loss_ratio < ceiling);
        large_enough && below_ceiling
    }

    /// Keep accepted groups, preserving order
    ///
    /// Groups are complete before filtering, so applying the same filter
    /// twice yields the same result.
    pub fn apply(&self, groups: &[GroupStats]) -> Vec<GroupStats> {
        groups.iter().filter(|group| self.accepts(group)).cloned().collect()
    }
}

/// Load the analysis configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If values fail validation
///
/// # Example
/// ```ignore
/// let config = load_config("analysis.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configurations that cannot produce a meaningful analysis
pub fn validate_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if !config.max_loss_ratio.is_finite() || config.max_loss_ratio <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "max_loss_ratio must be a positive number, got {}",
            config.max_loss_ratio
        )));
    }

    if config.dimensions.is_empty() {
        return Err(ConfigError::Invalid("at least one dimension is required".to_string()));
    }

    let mut names = HashSet::new();
    for dimension in &config.dimensions {
        if dimension.name.trim().is_empty() {
            return Err(ConfigError::Invalid("dimension name cannot be empty".to_string()));
        }
        if !names.insert(dimension.name.as_str()) {
            return Err(ConfigError::Invalid(format!("duplicate dimension '{}'", dimension.name)));
        }
        if dimension.keys.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "dimension '{}' has no grouping keys",
                dimension.name
            )));
        }
    }

    Ok(())
}

/// Render a configuration as TOML
pub fn config_to_toml(config: &AnalysisConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
