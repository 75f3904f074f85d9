//! Normalize command: export the typed dataset in canonical column order.

use super::utils::load_records;
use crate::output::write_normalized;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Normalize `input` and write it to `output`
///
/// **Public** - entry point for `normalize`
///
/// # Returns
/// Number of rows written
pub fn execute_normalize(input: &Path, output: &Path) -> Result<usize> {
    let (_, records) = load_records(input)?;

    write_normalized(&records, output).context("Failed to write normalized CSV")?;

    info!("✓ {} rows written to: {}", records.len(), output.display());
    Ok(records.len())
}
