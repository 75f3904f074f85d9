//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod inspect;
pub mod models;
pub mod normalize;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args};
pub use inspect::{execute_check, execute_describe};
pub use models::{AnalyzeArgs, CheckReport};
pub use normalize::execute_normalize;
pub use utils::{display_config, display_version, load_records, validate_report_file};
