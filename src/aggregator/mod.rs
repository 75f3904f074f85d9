//! Loss ratio computation and aggregation of policy records.
//!
//! This module transforms normalized records into:
//! - Per-policy loss ratios and division anomalies
//! - Grouped loss ratios (ratio of sums) by categorical keys
//! - Portfolio totals and descriptive statistics

pub mod grouper;
pub mod metrics;
pub mod ratio;

// Re-export main types and functions
pub use grouper::{aggregate, compare_by_loss_ratio, GroupStats};
pub use metrics::{describe, summarize_portfolio, Description, PortfolioSummary};
pub use ratio::{
    birth_year, birth_year_outliers, compute_loss_ratios, find_division_anomalies, loss_ratio,
    policy_loss_ratio, DivisionAnomaly,
};
