//! Dataset loading, type normalization and record schema.
//!
//! This module handles:
//! - Reading the policy CSV into a raw table
//! - Validating and coercing column types
//! - Defining the normalized record in canonical column order

pub mod loader;
pub mod normalizer;
pub mod schema;

// Re-export main types
pub use loader::{load_dataset, load_from_reader, NullCount, RawDataset};
pub use normalizer::{check_integral, normalize, normalize_record, parse_date};
pub use schema::{BonusClass, CategoricalColumn, PolicyRecord, RawPolicy};
