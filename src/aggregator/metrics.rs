//! Portfolio-level metrics and descriptive statistics.
//!
//! Descriptive statistics summarize every normalized column the way an
//! analyst would look at a fresh dataset: distribution of numeric columns,
//! cardinality of categorical columns, and range of date columns.

use super::ratio::{compute_loss_ratios, loss_ratio};
use crate::parser::{CategoricalColumn, PolicyRecord};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Portfolio-wide totals and the two competing ratio statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of policies
    pub policy_count: usize,

    /// Total premium received
    pub premium_received: f64,

    /// Total claims paid
    pub claims_paid: f64,

    /// Ratio of sums over the whole portfolio
    #[serde(with = "crate::aggregator::grouper::nullable_ratio")]
    pub overall_loss_ratio: f64,

    /// Mean of finite per-policy ratios (shown for contrast only)
    #[serde(with = "crate::aggregator::grouper::nullable_ratio")]
    pub mean_individual_loss_ratio: f64,

    /// Policies whose own ratio is not finite
    pub division_anomalies: usize,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            policy_count: 0,
            premium_received: 0.0,
            claims_paid: 0.0,
            overall_loss_ratio: f64::NAN,
            mean_individual_loss_ratio: f64::NAN,
            division_anomalies: 0,
        }
    }
}

impl PortfolioSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and terminal output
    pub fn summary(&self) -> String {
        format!(
            "Policies: {} | Premium: {:.2} | Claims: {:.2} | Loss ratio: {:.4} | Mean of policy ratios: {:.4} | Anomalies: {}",
            self.policy_count,
            self.premium_received,
            self.claims_paid,
            self.overall_loss_ratio,
            self.mean_individual_loss_ratio,
            self.division_anomalies
        )
    }
}

/// Compute portfolio totals
pub fn summarize_portfolio(records: &[PolicyRecord]) -> PortfolioSummary {
    if records.is_empty() {
        return PortfolioSummary::default();
    }

    let premium_received: f64 = records.iter().map(|r| r.policy_premium_received_brl).sum();
    let claims_paid: f64 = records.iter().map(|r| r.policy_claims_total_amount_paid_brl).sum();

    let ratios = compute_loss_ratios(records);
    let finite: Vec<f64> = ratios.iter().copied().filter(|r| r.is_finite()).collect();
    let mean_individual_loss_ratio = if finite.is_empty() {
        f64::NAN
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };

    PortfolioSummary {
        policy_count: records.len(),
        premium_received,
        claims_paid,
        overall_loss_ratio: loss_ratio(claims_paid, premium_received),
        mean_individual_loss_ratio,
        division_anomalies: ratios.len() - finite.len(),
    }
}

/// Distribution of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Cardinality of one categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value (smallest label wins ties)
    pub top: String,
    pub freq: usize,
}

/// Range of one date column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    pub column: String,
    pub count: usize,
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Descriptive statistics for every normalized column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
    pub dates: Vec<DateSummary>,
}

/// Describe numeric, categorical and date columns
///
/// Numeric statistics only consider finite values; missing optional values
/// and non-finite ratios are left out of the count.
pub fn describe(records: &[PolicyRecord]) -> Description {
    debug!("Describing {} records", records.len());

    let ratios = compute_loss_ratios(records);

    let numeric_columns: Vec<(&str, Vec<f64>)> = vec![
        ("policy_exposure_days", records.iter().map(|r| r.policy_exposure_days).collect()),
        ("policy_premium_received_brl", records.iter().map(|r| r.policy_premium_received_brl).collect()),
        ("policy_claims_num_reported", records.iter().map(|r| r.policy_claims_num_reported as f64).collect()),
        ("policy_claims_num_paid", records.iter().map(|r| r.policy_claims_num_paid as f64).collect()),
        (
            "policy_claims_total_amount_paid_brl",
            records.iter().map(|r| r.policy_claims_total_amount_paid_brl).collect(),
        ),
        (
            "policy_holder_residence_latitude",
            records.iter().filter_map(|r| r.policy_holder_residence_latitude).collect(),
        ),
        (
            "policy_holder_residence_longitude",
            records.iter().filter_map(|r| r.policy_holder_residence_longitude).collect(),
        ),
        ("vehicle_value_brl", records.iter().filter_map(|r| r.vehicle_value_brl).collect()),
        ("policy_loss_ratio", ratios),
    ];

    let numeric = numeric_columns
        .into_iter()
        .filter_map(|(column, values)| numeric_summary(column, values))
        .collect();

    let categorical = CategoricalColumn::ALL
        .iter()
        .filter_map(|column| categorical_summary(*column, records))
        .collect();

    let date_columns: Vec<(&str, Vec<NaiveDate>)> = vec![
        ("policy_start_date", records.iter().map(|r| r.policy_start_date).collect()),
        ("policy_holder_birth_date", records.iter().map(|r| r.policy_holder_birth_date).collect()),
        ("vehicle_make_year", records.iter().map(|r| r.vehicle_make_year).collect()),
    ];

    let dates = date_columns
        .into_iter()
        .filter_map(|(column, values)| date_summary(column, &values))
        .collect();

    Description {
        numeric,
        categorical,
        dates,
    }
}

fn numeric_summary(column: &str, values: Vec<f64>) -> Option<NumericSummary> {
    let mut values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(NumericSummary {
        column: column.to_string(),
        count: n,
        mean,
        std: variance.sqrt(),
        min: values[0],
        p25: percentile(&values, 0.25),
        p50: percentile(&values, 0.50),
        p75: percentile(&values, 0.75),
        max: values[n - 1],
    })
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = p * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

fn categorical_summary(column: CategoricalColumn, records: &[PolicyRecord]) -> Option<CategoricalSummary> {
    if records.is_empty() {
        return None;
    }

    let mut frequencies: HashMap<String, usize> = HashMap::new();
    for record in records {
        *frequencies.entry(column.value(record).into_owned()).or_insert(0) += 1;
    }

    let (top, freq) = frequencies
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(value, count)| (value.clone(), *count))?;

    Some(CategoricalSummary {
        column: column.name().to_string(),
        count: records.len(),
        unique: frequencies.len(),
        top,
        freq,
    })
}

fn date_summary(column: &str, values: &[NaiveDate]) -> Option<DateSummary> {
    Some(DateSummary {
        column: column.to_string(),
        count: values.len(),
        min: *values.iter().min()?,
        max: *values.iter().max()?,
    })
}
