use crate::output::read_report;
use crate::parser::{load_dataset, normalize, PolicyRecord, RawDataset};
use crate::segments::{config_to_toml, AnalysisConfig, AnalysisReport};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Load and normalize a dataset, keeping the raw rows alongside
pub fn load_records(input: &Path) -> Result<(RawDataset, Vec<PolicyRecord>)> {
    let raw = load_dataset(input).with_context(|| format!("Failed to load dataset {}", input.display()))?;
    let records = normalize(&raw).context("Failed to normalize dataset")?;
    debug!("Loaded {} policies from {}", records.len(), input.display());
    Ok((raw, records))
}

/// Validate an analysis report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<AnalysisReport> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path).context("Failed to read analysis report")?;

    if report.version != SCHEMA_VERSION {
        println!(
            "⚠️  Report schema v{} differs from current v{}",
            report.version, SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Generated: {}", report.generated_at);
    println!("  Policies: {}", report.portfolio.policy_count);
    println!("  Dimensions: {}", report.dimensions.len());
    println!("  Opportunities: {}", report.opportunities().count());

    Ok(report)
}

/// Display the built-in analysis configuration
pub fn display_config(show_details: bool) -> Result<()> {
    let config = AnalysisConfig::default();

    println!("Loss Ratio Studio Analysis Configuration");
    println!("Report Schema Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        print!("{}", config_to_toml(&config)?);
    } else {
        println!("Loss ratio ceiling: {}", config.max_loss_ratio);
        for dimension in &config.dimensions {
            println!("  {:<14} min {} policies", dimension.name, dimension.min_policies);
        }
        println!();
        println!("Use --show to print the full configuration as TOML");
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Loss Ratio Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Loss-ratio segmentation of motor insurance policy portfolios.");
}
