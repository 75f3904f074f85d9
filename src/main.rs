//! Loss Ratio Studio CLI
//!
//! Loss-ratio segmentation of motor insurance policy portfolios.
//! Groups policies by categorical dimensions and lists the segments
//! whose claims-to-premium ratio is below a ceiling.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use loss_ratio_studio::commands::{
    display_config, display_version, execute_analyze, execute_check, execute_describe, execute_normalize,
    validate_args, validate_report_file, AnalyzeArgs,
};

/// Loss Ratio Studio - segment analysis for insurance portfolios
#[derive(Parser, Debug)]
#[command(name = "loss-ratio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full analysis and list opportunities
    Analyze {
        /// Policy dataset (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Analysis configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output path for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Loss ratio ceiling for opportunities
        #[arg(long, env = "LOSS_RATIO_MAX")]
        max_loss_ratio: Option<f64>,

        /// Print portfolio totals and data quality diagnostics
        #[arg(long)]
        summary: bool,
    },

    /// Show missing values and descriptive statistics
    Describe {
        /// Policy dataset (CSV)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Check birth years and zero-premium policies
    Check {
        /// Policy dataset (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Flag holders born before this year
        #[arg(long)]
        before_year: Option<i32>,
    },

    /// Write the normalized dataset in canonical column order
    Normalize {
        /// Policy dataset (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate an analysis report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the built-in analysis configuration
    Config {
        /// Print the full configuration as TOML
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            output,
            max_loss_ratio,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                config,
                output,
                max_loss_ratio,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Describe { input } => {
            execute_describe(&input)?;
        }

        Commands::Check { input, before_year } => {
            execute_check(&input, before_year)?;
        }

        Commands::Normalize { input, output } => {
            execute_normalize(&input, &output)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Config { show } => {
            display_config(show)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
