mod common;

use common::{csv_text, dataset_file, write_file, Row};
use loss_ratio_studio::parser::{load_dataset, load_from_reader, normalize, BonusClass};
use loss_ratio_studio::utils::config::CANONICAL_COLUMNS;
use loss_ratio_studio::utils::{LoadError, NormalizationError};
use pretty_assertions::assert_eq;

#[test]
fn test_load_and_normalize_file() {
    let file = dataset_file(&[Row::new("p1"), Row::new("p2").region("RJ")]);

    let raw = load_dataset(file.path()).unwrap();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.headers, CANONICAL_COLUMNS.to_vec());

    let records = normalize(&raw).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].policy_id, "p1");
    assert_eq!(records[1].policy_holder_residence_region, "RJ");
    assert_eq!(records[0].policy_exposure_days, 365.0);
    assert_eq!(records[0].policy_holder_bonus_clas, BonusClass::Class(1));
    assert_eq!(records[0].vehicle_make_year.to_string(), "2010-01-01");
}

#[test]
fn test_float_like_zipcode_becomes_integer_text() {
    let csv = csv_text(&[Row::new("p1").set("policy_holder_zipcode", "12345.0")]);
    let records = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap();

    assert_eq!(records[0].policy_holder_zipcode, "12345");
}

#[test]
fn test_fractional_zipcode_fails() {
    let csv = csv_text(&[
        Row::new("p1"),
        Row::new("p2").set("policy_holder_zipcode", "12345.5"),
    ]);
    let raw = load_from_reader(csv.as_bytes(), "inline.csv").unwrap();

    let err = normalize(&raw).unwrap_err();
    assert_eq!(
        err,
        NormalizationError::NonIntegral {
            row: 2,
            column: "policy_holder_zipcode",
            value: 12345.5,
            remainder: 0.5,
        }
    );
}

#[test]
fn test_missing_bonus_class_is_unassigned() {
    let csv = csv_text(&[
        Row::new("p1").set("policy_holder_bonus_clas", ""),
        Row::new("p2").set("policy_holder_bonus_clas", "0.0"),
    ]);
    let records = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap();

    assert_eq!(records[0].policy_holder_bonus_clas, BonusClass::Unassigned);
    assert_eq!(records[0].policy_holder_bonus_clas.label(), "<NA>");
    assert_eq!(records[1].policy_holder_bonus_clas, BonusClass::Class(0));
}

#[test]
fn test_missing_categorical_becomes_marker() {
    let csv = csv_text(&[Row::new("p1").set("vehicle_brand", "")]);
    let records = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap();

    assert_eq!(records[0].vehicle_brand, "<NA>");
}

#[test]
fn test_bad_date_names_row_and_column() {
    let csv = csv_text(&[Row::new("p1").set("policy_holder_birth_date", "not-a-date")]);
    let err = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap_err();

    assert_eq!(err.column(), "policy_holder_birth_date");
    assert_eq!(
        err.to_string(),
        "Row 1, column 'policy_holder_birth_date': cannot parse date 'not-a-date'"
    );
}

#[test]
fn test_missing_required_value() {
    let csv = csv_text(&[Row::new("p1").set("policy_premium_received_brl", "")]);
    let err = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap_err();

    assert_eq!(
        err,
        NormalizationError::MissingValue {
            row: 1,
            column: "policy_premium_received_brl",
        }
    );
}

#[test]
fn test_infinite_claims_amount_fails() {
    let csv = csv_text(&[Row::new("p1").set("policy_claims_total_amount_paid_brl", "inf")]);
    let raw = load_from_reader(csv.as_bytes(), "inline.csv").unwrap();

    let err = normalize(&raw).unwrap_err();
    assert!(matches!(
        err,
        NormalizationError::OutOfRange {
            row: 1,
            column: "policy_claims_total_amount_paid_brl",
            ..
        }
    ));
}

#[test]
fn test_fractional_exposure_days_accepted() {
    let csv = csv_text(&[Row::new("p1").set("policy_exposure_days", "182.5")]);
    let records = normalize(&load_from_reader(csv.as_bytes(), "inline.csv").unwrap()).unwrap();

    assert_eq!(records[0].policy_exposure_days, 182.5);
}

#[test]
fn test_malformed_number_is_load_error() {
    let csv = csv_text(&[Row::new("p1").set("policy_premium_received_brl", "lots")]);
    let result = load_from_reader(csv.as_bytes(), "inline.csv");

    assert!(matches!(result, Err(LoadError::Csv(_))));
}

#[test]
fn test_missing_columns() {
    let file = write_file("policy_id,policy_start_date\np1,2019-01-01\n");
    match load_dataset(file.path()) {
        Err(LoadError::MissingColumns(missing)) => {
            assert_eq!(missing.len(), 18);
            assert!(missing.contains(&"vehicle_value_brl".to_string()));
        }
        other => panic!("expected MissingColumns, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_unreadable_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_dataset(dir.path().join("absent.csv"));

    assert!(matches!(result, Err(LoadError::Unreadable { .. })));
}

#[test]
fn test_null_counts() {
    let csv = csv_text(&[
        Row::new("p1").set("vehicle_value_brl", ""),
        Row::new("p2").set("vehicle_value_brl", "").set("policy_holder_gender", ""),
        Row::new("p3"),
    ]);
    let raw = load_from_reader(csv.as_bytes(), "inline.csv").unwrap();
    let counts = raw.null_counts();

    assert_eq!(counts.len(), 20);
    let missing = |column: &str| counts.iter().find(|c| c.column == column).unwrap().missing;
    assert_eq!(missing("vehicle_value_brl"), 2);
    assert_eq!(missing("policy_holder_gender"), 1);
    assert_eq!(missing("policy_id"), 0);
}

#[test]
fn test_normalize_leaves_raw_untouched() {
    let csv = csv_text(&[Row::new("p1").set("policy_holder_zipcode", "12345.0")]);
    let raw = load_from_reader(csv.as_bytes(), "inline.csv").unwrap();
    let before = raw.records.clone();

    normalize(&raw).unwrap();

    assert_eq!(raw.records, before);
    assert_eq!(raw.records[0].policy_holder_zipcode, Some(12345.0));
}
