//! Output writers for analysis reports and normalized data.
//!
//! This module handles writing data to disk and to the terminal:
//! - JSON analysis reports (pretty)
//! - Normalized CSV in canonical column order
//! - Terminal tables

pub mod json;
pub mod normalized;
pub mod table;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use normalized::{write_normalized, write_normalized_to};
pub use table::{
    render_anomalies, render_birth_years, render_description, render_dimension, render_null_counts,
    render_opportunities, render_portfolio,
};

/// Validate that an output path is writable
///
/// Empty paths and existing directories are rejected. A missing parent
/// directory is fine; writers create it.
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

/// File size in bytes, 0 when unavailable
pub(crate) fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
