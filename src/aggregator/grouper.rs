//! Group policies by categorical keys and compute group loss ratios.
//!
//! A group's loss ratio is the ratio of sums, `sum(claims) / sum(premium)`.
//! It is never the mean of the per-policy ratios: the two statistics differ as
//! soon as premiums differ across policies.
//!
//! Example: premiums 100, 200, 50 with claims 10, 100, 5 give a group ratio
//! of 115/350 ≈ 0.329, while the mean of individual ratios is ≈ 0.233.

use super::ratio::loss_ratio;
use crate::parser::{CategoricalColumn, PolicyRecord};
use crate::utils::config::KEY_SEPARATOR;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Aggregated figures for one distinct combination of key values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Key values, one per grouping column, in grouping order
    pub key: Vec<String>,

    /// Number of policies in the group
    pub policy_count: usize,

    /// Sum of premium received
    pub premium_received: f64,

    /// Sum of claims paid
    pub claims_paid: f64,

    /// claims_paid / premium_received (non-finite when the premium sum is zero)
    #[serde(with = "nullable_ratio")]
    pub loss_ratio: f64,
}

impl GroupStats {
    /// Key values joined for display, e.g. "SP / Campinas"
    pub fn label(&self) -> String {
        self.key.join(KEY_SEPARATOR)
    }
}

#[derive(Default)]
struct Accumulator {
    policy_count: usize,
    premium_received: f64,
    claims_paid: f64,
}

/// Aggregate records by the given key columns
///
/// **Public** - main entry point for grouping
///
/// # Arguments
/// * `records` - Normalized policy records (every record lands in exactly one group)
/// * `keys` - Grouping columns; an empty slice yields one portfolio-wide group
///
/// # Returns
/// One `GroupStats` per distinct key, sorted by ascending loss ratio.
/// Non-finite ratios sort last; ties are broken by key.
pub fn aggregate(records: &[PolicyRecord], keys: &[CategoricalColumn]) -> Vec<GroupStats> {
    debug!("Aggregating {} records by {:?}", records.len(), keys);

    let mut groups: HashMap<Vec<String>, Accumulator> = HashMap::new();

    for record in records {
        let key: Vec<String> = keys.iter().map(|column| column.value(record).into_owned()).collect();
        let acc = groups.entry(key).or_default();
        acc.policy_count += 1;
        acc.premium_received += record.policy_premium_received_brl;
        acc.claims_paid += record.policy_claims_total_amount_paid_brl;
    }

    let mut stats: Vec<GroupStats> = groups
        .into_iter()
        .map(|(key, acc)| GroupStats {
            key,
            policy_count: acc.policy_count,
            premium_received: acc.premium_received,
            claims_paid: acc.claims_paid,
            loss_ratio: loss_ratio(acc.claims_paid, acc.premium_received),
        })
        .collect();

    stats.sort_by(compare_by_loss_ratio);

    debug!("Built {} groups", stats.len());

    stats
}

/// Ascending loss ratio, non-finite values last, then by key
pub fn compare_by_loss_ratio(a: &GroupStats, b: &GroupStats) -> Ordering {
    match (a.loss_ratio.is_finite(), b.loss_ratio.is_finite()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.loss_ratio.total_cmp(&b.loss_ratio),
    }
    .then_with(|| a.key.cmp(&b.key))
}

/// JSON has no NaN or infinity: non-finite ratios are written as `null`
/// and read back as NaN.
pub(crate) mod nullable_ratio {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
