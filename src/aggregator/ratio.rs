//! Per-policy loss ratio and record-level diagnostics.
//!
//! The ratio is a plain division with no rounding and no guard: a zero premium
//! produces infinity (or NaN when claims are zero too). Such rows are reported
//! as `DivisionAnomaly` values instead of failing the run.

use crate::parser::PolicyRecord;
use chrono::Datelike;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claims paid over premium received
pub fn loss_ratio(claims_paid: f64, premium_received: f64) -> f64 {
    claims_paid / premium_received
}

/// Loss ratio of a single policy
pub fn policy_loss_ratio(record: &PolicyRecord) -> f64 {
    loss_ratio(
        record.policy_claims_total_amount_paid_brl,
        record.policy_premium_received_brl,
    )
}

/// One loss ratio per record, in record order
pub fn compute_loss_ratios(records: &[PolicyRecord]) -> Vec<f64> {
    records.iter().map(policy_loss_ratio).collect()
}

/// A policy whose loss ratio is not a finite number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionAnomaly {
    pub policy_id: String,
    pub premium_received: f64,
    pub claims_paid: f64,
}

impl DivisionAnomaly {
    /// The non-finite ratio this policy produces
    pub fn loss_ratio(&self) -> f64 {
        loss_ratio(self.claims_paid, self.premium_received)
    }
}

/// Collect every policy with a non-finite loss ratio
///
/// Each anomaly is logged as a warning; none of them stops the run.
pub fn find_division_anomalies(records: &[PolicyRecord]) -> Vec<DivisionAnomaly> {
    let anomalies: Vec<DivisionAnomaly> = records
        .iter()
        .filter(|record| !policy_loss_ratio(record).is_finite())
        .map(|record| DivisionAnomaly {
            policy_id: record.policy_id.clone(),
            premium_received: record.policy_premium_received_brl,
            claims_paid: record.policy_claims_total_amount_paid_brl,
        })
        .collect();

    for anomaly in &anomalies {
        warn!(
            "Policy {} has premium {} and claims {}: loss ratio is {}",
            anomaly.policy_id,
            anomaly.premium_received,
            anomaly.claims_paid,
            anomaly.loss_ratio()
        );
    }

    anomalies
}

/// Birth year of the policy holder
pub fn birth_year(record: &PolicyRecord) -> i32 {
    record.policy_holder_birth_date.year()
}

/// Count policies per holder birth year, for years before `before_year`
///
/// A sanity check on birth dates: placeholder dates (e.g. 1900) show up as a
/// single heavily populated year.
pub fn birth_year_outliers(records: &[PolicyRecord], before_year: i32) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in records.iter().map(birth_year).filter(|year| *year < before_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}
