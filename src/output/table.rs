//! Terminal rendering for analysis results.
//!
//! Box-drawn tables for grouped loss ratios, with groups under the
//! loss-ratio ceiling highlighted.

use crate::aggregator::metrics::{CategoricalSummary, DateSummary, NumericSummary};
use crate::aggregator::{Description, DivisionAnomaly, GroupStats, PortfolioSummary};
use crate::parser::NullCount;
use crate::segments::{AnalysisReport, DimensionReport};
use colored::*;
use std::collections::BTreeMap;

const LABEL_WIDTH: usize = 36;

/// Render the portfolio totals block
pub fn render_portfolio(portfolio: &PortfolioSummary) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&"Portfolio Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Policies:              {}\n", portfolio.policy_count));
    out.push_str(&format!("Premium received:      {:.2}\n", portfolio.premium_received));
    out.push_str(&format!("Claims paid:           {:.2}\n", portfolio.claims_paid));
    out.push_str(&format!(
        "Loss ratio:            {}\n",
        format_ratio(portfolio.overall_loss_ratio)
    ));
    out.push_str(&format!(
        "Mean of policy ratios: {}\n",
        format_ratio(portfolio.mean_individual_loss_ratio)
    ));
    if portfolio.division_anomalies > 0 {
        out.push_str(
            &format!("⚠️  {} policies with zero premium\n", portfolio.division_anomalies)
                .yellow()
                .to_string(),
        );
    }
    out.push_str("---------------------------------------------------\n");
    out
}

/// Render one dimension's groups as a table
///
/// Groups strictly below `max_loss_ratio` are highlighted.
pub fn render_dimension(dimension: &DimensionReport, max_loss_ratio: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n  {} (by {}, min {} policies)\n",
        dimension.name.to_uppercase().bold(),
        dimension.keys.join(", "),
        dimension.min_policies
    ));
    out.push_str(&group_table(&dimension.groups, Some(max_loss_ratio)));
    if dimension.excluded_groups > 0 {
        out.push_str(&format!(
            "  {} smaller groups not shown\n",
            dimension.excluded_groups
        ));
    }
    out
}

/// Render every opportunity in the report, one table per dimension
pub fn render_opportunities(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("\n🎯 ");
    out.push_str(
        &format!("Opportunities (loss ratio < {})", report.max_loss_ratio)
            .bold()
            .to_string(),
    );
    out.push('\n');

    let searched: Vec<&DimensionReport> = report
        .dimensions
        .iter()
        .filter(|d| d.opportunities.is_some())
        .collect();

    if searched.iter().all(|d| d.opportunities.iter().flatten().next().is_none()) {
        out.push_str("  No segment qualifies.\n");
        return out;
    }

    for dimension in searched {
        let groups = dimension.opportunities.as_deref().unwrap_or_default();
        if groups.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "\n  {} (min {} policies)\n",
            dimension.name.to_uppercase(),
            dimension.opportunity_min_policies
        ));
        out.push_str(&group_table(groups, None));
    }
    out
}

/// Render the zero-premium policies
pub fn render_anomalies(anomalies: &[DivisionAnomaly]) -> String {
    if anomalies.is_empty() {
        return format!("{}\n", "✅ No zero-premium policies".green());
    }

    let mut out = format!(
        "{}\n",
        format!("⚠️  {} policies with zero premium:", anomalies.len()).yellow().bold()
    );
    for anomaly in anomalies {
        out.push_str(&format!(
            "  {:<20} premium {:>12.2}  claims {:>12.2}  ratio {}\n",
            anomaly.policy_id,
            anomaly.premium_received,
            anomaly.claims_paid,
            format_ratio(anomaly.loss_ratio())
        ));
    }
    out
}

/// Render the birth-year outlier counts
pub fn render_birth_years(outliers: &BTreeMap<i32, usize>, cutoff: i32) -> String {
    if outliers.is_empty() {
        return format!("{}\n", format!("✅ No holder born before {}", cutoff).green());
    }

    let total: usize = outliers.values().sum();
    let mut out = format!(
        "{}\n",
        format!("⚠️  {} holders born before {}:", total, cutoff).yellow().bold()
    );
    for (year, count) in outliers {
        out.push_str(&format!("  {}  {:>8}\n", year, count));
    }
    out
}

/// Render missing-value counts per raw column
pub fn render_null_counts(counts: &[NullCount]) -> String {
    let mut out = String::new();
    out.push_str("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┓\n");
    out.push_str(&format!("  ┃ {:<36} ┃ {:>8} ┃\n", "Column", "Missing"));
    out.push_str("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━┫\n");
    for count in counts {
        let missing = format!("{:>8}", count.missing);
        let missing = if count.missing > 0 {
            missing.yellow().to_string()
        } else {
            missing
        };
        out.push_str(&format!("  ┃ {:<36} ┃ {} ┃\n", count.column, missing));
    }
    out.push_str("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┛\n");
    out
}

/// Render descriptive statistics for every column kind
pub fn render_description(description: &Description) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n  {}\n", "NUMERIC".bold()));
    out.push_str(&format!(
        "  {:<36} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    ));
    for summary in &description.numeric {
        out.push_str(&numeric_row(summary));
    }

    out.push_str(&format!("\n  {}\n", "CATEGORICAL".bold()));
    out.push_str(&format!(
        "  {:<36} {:>8} {:>8} {:>20} {:>8}\n",
        "column", "count", "unique", "top", "freq"
    ));
    for summary in &description.categorical {
        out.push_str(&categorical_row(summary));
    }

    out.push_str(&format!("\n  {}\n", "DATES".bold()));
    out.push_str(&format!(
        "  {:<36} {:>8} {:>12} {:>12}\n",
        "column", "count", "min", "max"
    ));
    for summary in &description.dates {
        out.push_str(&date_row(summary));
    }

    out
}

fn group_table(groups: &[GroupStats], highlight_below: Option<f64>) -> String {
    let mut out = String::new();
    out.push_str("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━┓\n");
    out.push_str(&format!(
        "  ┃ {:<36} ┃ {:>8} ┃ {:>14} ┃ {:>14} ┃ {:>10} ┃\n",
        "Group", "Policies", "Premium", "Claims", "Loss ratio"
    ));
    out.push_str("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━┫\n");

    for group in groups {
        let ratio = format!("{:>10}", format_ratio(group.loss_ratio));
        let ratio = match highlight_below {
            Some(max) if group.loss_ratio < max => ratio.green().bold().to_string(),
            _ if !group.loss_ratio.is_finite() => ratio.red().to_string(),
            _ => ratio,
        };
        out.push_str(&format!(
            "  ┃ {:<36} ┃ {:>8} ┃ {:>14.2} ┃ {:>14.2} ┃ {} ┃\n",
            truncate_label(&group.label()),
            group.policy_count,
            group.premium_received,
            group.claims_paid,
            ratio
        ));
    }

    out.push_str("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━┛\n");
    out
}

fn numeric_row(s: &NumericSummary) -> String {
    format!(
        "  {:<36} {:>8} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}\n",
        s.column, s.count, s.mean, s.std, s.min, s.p25, s.p50, s.p75, s.max
    )
}

fn categorical_row(s: &CategoricalSummary) -> String {
    format!(
        "  {:<36} {:>8} {:>8} {:>20} {:>8}\n",
        s.column,
        s.count,
        s.unique,
        truncate(&s.top, 20),
        s.freq
    )
}

fn date_row(s: &DateSummary) -> String {
    format!(
        "  {:<36} {:>8} {:>12} {:>12}\n",
        s.column, s.count, s.min, s.max
    )
}

/// Four decimals for finite ratios, "inf"/"n/a" otherwise
pub(crate) fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.4}", ratio)
    } else if ratio.is_infinite() {
        "inf".to_string()
    } else {
        "n/a".to_string()
    }
}

fn truncate_label(label: &str) -> String {
    truncate(label, LABEL_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let tail: String = text
        .chars()
        .rev()
        .take(width - 3)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("...{}", tail)
}
