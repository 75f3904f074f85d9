use super::*;
use crate::parser::{CategoricalColumn, PolicyRecord};
use crate::test_support::policy;

fn with_brand(id: &str, brand: &str, premium: f64, claims: f64) -> PolicyRecord {
    let mut record = policy(id, "SP", premium, claims);
    record.vehicle_brand = brand.to_string();
    record
}

fn brand_portfolio() -> Vec<PolicyRecord> {
    let mut records = Vec::new();
    // Fiat: 3 policies, ratio 0.10
    for i in 0..3 {
        records.push(with_brand(&format!("f{i}"), "Fiat", 100.0, 10.0));
    }
    // VW: 2 policies, ratio 0.20 (below min size)
    for i in 0..2 {
        records.push(with_brand(&format!("v{i}"), "VW", 100.0, 20.0));
    }
    // Ford: 4 policies, ratio 0.50
    for i in 0..4 {
        records.push(with_brand(&format!("o{i}"), "Ford", 100.0, 50.0));
    }
    records
}

fn brand_dimension(min_policies: usize) -> DimensionConfig {
    DimensionConfig::new("vehicle_brand", &[CategoricalColumn::VehicleBrand], min_policies, true)
}

#[test]
fn test_analyze_dimension_filters_after_aggregation() {
    let records = brand_portfolio();
    let report = analyze_dimension(&records, &brand_dimension(3), 0.30);

    let kept: Vec<String> = report.groups.iter().map(|g| g.label()).collect();
    assert_eq!(kept, vec!["Fiat", "Ford"]);
    assert_eq!(report.excluded_groups, 1);

    let opportunities = report.opportunities.unwrap();
    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].label(), "Fiat");
    assert_eq!(opportunities[0].policy_count, 3);
}

#[test]
fn test_boundary_group_is_opportunity() {
    let records = brand_portfolio();
    // Fiat has exactly 3 policies
    let report = analyze_dimension(&records, &brand_dimension(3), 0.30);
    assert!(report
        .opportunities
        .as_ref()
        .unwrap()
        .iter()
        .any(|g| g.label() == "Fiat"));

    let report = analyze_dimension(&records, &brand_dimension(4), 0.30);
    assert!(report.opportunities.unwrap().is_empty());
}

#[test]
fn test_dimension_without_opportunity_search() {
    let records = brand_portfolio();
    let dimension = DimensionConfig::new("gender", &[CategoricalColumn::Gender], 0, false);
    let report = analyze_dimension(&records, &dimension, 0.30);

    assert!(report.opportunities.is_none());
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.keys, vec!["policy_holder_gender".to_string()]);
}

#[test]
fn test_opportunities_use_their_own_floor() {
    let records = brand_portfolio();
    // VW (2 policies, 0.20) is hidden from the overview but still an opportunity
    let dimension = brand_dimension(3).with_opportunity_min_policies(2);
    let report = analyze_dimension(&records, &dimension, 0.30);

    let shown: Vec<String> = report.groups.iter().map(|g| g.label()).collect();
    assert_eq!(shown, vec!["Fiat", "Ford"]);
    assert_eq!(report.opportunity_min_policies, 2);

    let opportunities: Vec<String> = report
        .opportunities
        .unwrap()
        .iter()
        .map(|g| g.label())
        .collect();
    assert_eq!(opportunities, vec!["Fiat", "VW"]);
}

#[test]
fn test_build_report() {
    let mut records = brand_portfolio();
    records.push(with_brand("zero", "Fiat", 0.0, 0.0));

    let config = AnalysisConfig {
        max_loss_ratio: 0.30,
        birth_year_cutoff: 1930,
        dimensions: vec![brand_dimension(3)],
    };
    let report = build_report("policies.csv", &records, &config);

    assert_eq!(report.version, "1.0.0");
    assert_eq!(report.source, "policies.csv");
    assert_eq!(report.portfolio.policy_count, 10);
    assert_eq!(report.portfolio.division_anomalies, 1);
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].policy_id, "zero");
    assert!(report.birth_year_outliers.is_empty());

    let opportunities: Vec<(&str, String)> = report
        .opportunities()
        .map(|(dimension, group)| (dimension, group.label()))
        .collect();
    assert_eq!(opportunities, vec![("vehicle_brand", "Fiat".to_string())]);

    // zero-premium policy still counts toward Fiat's group
    let fiat = &report.dimension("vehicle_brand").unwrap().groups[0];
    assert_eq!(fiat.policy_count, 4);
    assert_eq!(fiat.loss_ratio, 30.0 / 300.0);
}
