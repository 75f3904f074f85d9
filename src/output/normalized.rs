//! Normalized dataset export.
//!
//! Field order of `PolicyRecord` is the canonical column order, so the
//! serialized header row matches it.

use super::{ensure_parent_dir, file_size, validate_output_path};
use crate::parser::PolicyRecord;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

/// Write normalized records as CSV
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or cannot be created
/// * `OutputError::CsvFailed` - Serialization or write error
pub fn write_normalized(records: &[PolicyRecord], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} normalized records to: {}", records.len(), output_path.display());

    validate_output_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let writer = csv::Writer::from_path(output_path)?;
    write_records(writer, records)?;

    info!("Normalized CSV written ({} bytes)", file_size(output_path));
    Ok(())
}

/// Write normalized records as CSV to any writer
pub fn write_normalized_to<W: Write>(records: &[PolicyRecord], writer: W) -> Result<(), OutputError> {
    write_records(csv::Writer::from_writer(writer), records)
}

fn write_records<W: Write>(mut writer: csv::Writer<W>, records: &[PolicyRecord]) -> Result<(), OutputError> {
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
