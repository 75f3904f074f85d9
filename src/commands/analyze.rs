//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the policy dataset
//! 2. Normalizes column types
//! 3. Aggregates every configured dimension
//! 4. Prints tables and writes the report

use super::models::AnalyzeArgs;
use crate::output::{
    render_anomalies, render_birth_years, render_dimension, render_opportunities, render_portfolio, write_report,
};
use crate::parser::{load_dataset, normalize};
use crate::segments::{build_report, load_config, validate_config, AnalysisConfig, AnalysisReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// The analysis report that was printed (and written, if requested)
///
/// # Errors
/// * Unreadable or malformed dataset
/// * Values that fail normalization
/// * Invalid configuration
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     input: PathBuf::from("policies.csv"),
///     output: Some(PathBuf::from("report.json")),
///     ..Default::default()
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    let config = resolve_config(&args)?;
    info!(
        "Analyzing {} ({} dimensions, loss ratio ceiling {})",
        args.input.display(),
        config.dimensions.len(),
        config.max_loss_ratio
    );

    info!("Step 1/4: Loading dataset...");
    let raw = load_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    info!("Step 2/4: Normalizing {} rows...", raw.len());
    let records = normalize(&raw).context("Failed to normalize dataset")?;

    info!("Step 3/4: Aggregating {} policies...", records.len());
    let report = build_report(&args.input, &records, &config);

    debug!("{}", report.portfolio.summary());
    for dimension in &report.dimensions {
        debug!(
            "  {}: {} groups shown, {} excluded",
            dimension.name,
            dimension.groups.len(),
            dimension.excluded_groups
        );
    }

    info!("Step 4/4: Writing results...");
    if args.print_summary {
        println!("{}", render_portfolio(&report.portfolio));
        println!("{}", render_anomalies(&report.anomalies));
        println!("{}", render_birth_years(&report.birth_year_outliers, config.birth_year_cutoff));
    }

    for dimension in &report.dimensions {
        println!("{}", render_dimension(dimension, report.max_loss_ratio));
    }
    println!("{}", render_opportunities(&report));

    if let Some(output) = &args.output {
        write_report(&report, output).context("Failed to write analysis report")?;
        info!("✓ Report written to: {}", output.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Load the configuration file (or defaults) and apply CLI overrides
///
/// **Private** - internal helper for execute_analyze
fn resolve_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(max_loss_ratio) = args.max_loss_ratio {
        debug!("Loss ratio ceiling overridden: {}", max_loss_ratio);
        config.max_loss_ratio = max_loss_ratio;
    }

    validate_config(&config).context("Invalid analysis configuration")?;
    Ok(config)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input dataset not found: {}", args.input.display());
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            anyhow::bail!("Configuration file not found: {}", config.display());
        }
    }

    if let Some(max) = args.max_loss_ratio {
        if !max.is_finite() || max <= 0.0 {
            anyhow::bail!("max_loss_ratio must be a positive number (got {})", max);
        }
    }

    if let Some(output) = &args.output {
        if output.is_dir() {
            anyhow::bail!("Output path is a directory: {}", output.display());
        }
    }

    Ok(())
}
