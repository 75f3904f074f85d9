//! Dataset loader.
//!
//! Reads the policy CSV into memory in a single pass. The header row must carry
//! every canonical column; extra columns are ignored.

use super::schema::RawPolicy;
use crate::utils::config::CANONICAL_COLUMNS;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The raw, untouched policy table
#[derive(Debug, Clone)]
pub struct RawDataset {
    /// Where the rows were read from
    pub source: PathBuf,

    /// Header row as found in the file
    pub headers: Vec<String>,

    /// One entry per data row, in file order
    pub records: Vec<RawPolicy>,
}

/// Missing-value count for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullCount {
    pub column: &'static str,
    pub missing: usize,
}

impl RawDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-column missing-value counts, in canonical column order
    pub fn null_counts(&self) -> Vec<NullCount> {
        let mut counts = [0usize; CANONICAL_COLUMNS.len()];
        for record in &self.records {
            for (count, missing) in counts.iter_mut().zip(record.missing_flags()) {
                if missing {
                    *count += 1;
                }
            }
        }

        CANONICAL_COLUMNS
            .iter()
            .zip(counts)
            .map(|(&column, missing)| NullCount { column, missing })
            .collect()
    }
}

/// Load the policy dataset from a CSV file
///
/// # Errors
/// * `LoadError::Unreadable` - file missing or not readable
/// * `LoadError::MissingColumns` - header lacks a required column
/// * `LoadError::Csv` - malformed row or unparseable numeric cell
pub fn load_dataset(path: impl AsRef<Path>) -> Result<RawDataset, LoadError> {
    let path = path.as_ref();

    info!("Loading dataset from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_from_reader(file, path)?;

    info!("Loaded {} policies ({} columns)", dataset.len(), dataset.headers.len());

    Ok(dataset)
}

/// Load the policy dataset from any reader
///
/// `source` is only recorded for reporting.
pub fn load_from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<RawDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    ensure_required_columns(&headers)?;

    let records = reader
        .deserialize::<RawPolicy>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Deserialized {} raw rows", records.len());

    Ok(RawDataset {
        source: source.into(),
        headers,
        records,
    })
}

/// Fail unless every canonical column is present in the header
fn ensure_required_columns(headers: &[String]) -> Result<(), LoadError> {
    let missing: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h.as_str() == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}
