//! Data inspection commands: descriptive statistics and sanity checks.

use super::models::CheckReport;
use super::utils::load_records;
use crate::aggregator::{birth_year_outliers, describe, find_division_anomalies, Description};
use crate::output::{render_anomalies, render_birth_years, render_description, render_null_counts};
use crate::utils::config::DEFAULT_BIRTH_YEAR_CUTOFF;
use anyhow::Result;
use log::info;
use std::path::Path;

/// Print missing-value counts and descriptive statistics
///
/// **Public** - entry point for `describe`
///
/// Null counts are taken on the raw rows, statistics on the normalized ones.
pub fn execute_describe(input: &Path) -> Result<Description> {
    let (raw, records) = load_records(input)?;

    println!("\n📋 {} rows, {} columns", raw.len(), raw.headers.len());
    println!("{}", render_null_counts(&raw.null_counts()));

    let description = describe(&records);
    println!("{}", render_description(&description));

    Ok(description)
}

/// Run the data quality checks
///
/// **Public** - entry point for `check`
///
/// # Arguments
/// * `input` - Policy dataset
/// * `before_year` - Birth-year cutoff (defaults to 1930)
pub fn execute_check(input: &Path, before_year: Option<i32>) -> Result<CheckReport> {
    let cutoff = before_year.unwrap_or(DEFAULT_BIRTH_YEAR_CUTOFF);
    let (_, records) = load_records(input)?;

    info!("Checking {} policies (birth year cutoff {})", records.len(), cutoff);

    let report = CheckReport {
        birth_year_outliers: birth_year_outliers(&records, cutoff),
        anomalies: find_division_anomalies(&records),
    };

    println!("{}", render_birth_years(&report.birth_year_outliers, cutoff));
    println!("{}", render_anomalies(&report.anomalies));

    Ok(report)
}
