//! Column type normalization.
//!
//! Every coercion is validated first and returns a `Result`; nothing is
//! truncated or silently dropped. Integer-valued columns must have a zero
//! fractional remainder, dates must parse, and required cells must be present.
//! The raw dataset is only borrowed, so the loaded input stays untouched.

use super::loader::RawDataset;
use super::schema::{BonusClass, PolicyRecord, RawPolicy};
use crate::utils::config::{DATETIME_FORMATS, DATE_FORMATS, MISSING_LABEL};
use crate::utils::error::NormalizationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};

/// Normalize every raw row into a typed `PolicyRecord`
///
/// **Public** - main entry point of the normalization stage
///
/// # Returns
/// One record per raw row, same order, fields in canonical column order
///
/// # Errors
/// The first row/column that fails its coercion precondition aborts the run.
pub fn normalize(dataset: &RawDataset) -> Result<Vec<PolicyRecord>, NormalizationError> {
    info!("Normalizing {} raw rows", dataset.len());

    let records = dataset
        .records
        .iter()
        .enumerate()
        .map(|(idx, raw)| normalize_record(idx + 1, raw))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Normalization produced {} records", records.len());

    Ok(records)
}

/// Normalize a single raw row
///
/// `row` is the 1-based data row number used in error messages.
pub fn normalize_record(row: usize, raw: &RawPolicy) -> Result<PolicyRecord, NormalizationError> {
    Ok(PolicyRecord {
        policy_id: require_text(row, "policy_id", raw.policy_id.as_deref())?.to_string(),
        policy_start_date: parse_date(
            row,
            "policy_start_date",
            require_text(row, "policy_start_date", raw.policy_start_date.as_deref())?,
        )?,
        policy_exposure_days: require_number(row, "policy_exposure_days", raw.policy_exposure_days)?,
        policy_premium_received_brl: require_number(
            row,
            "policy_premium_received_brl",
            raw.policy_premium_received_brl,
        )?,
        policy_claims_num_reported: to_count(
            row,
            "policy_claims_num_reported",
            raw.policy_claims_num_reported,
        )?,
        policy_claims_num_paid: to_count(row, "policy_claims_num_paid", raw.policy_claims_num_paid)?,
        policy_claims_total_amount_paid_brl: require_number(
            row,
            "policy_claims_total_amount_paid_brl",
            raw.policy_claims_total_amount_paid_brl,
        )?,
        policy_holder_birth_date: parse_date(
            row,
            "policy_holder_birth_date",
            require_text(row, "policy_holder_birth_date", raw.policy_holder_birth_date.as_deref())?,
        )?,
        policy_holder_gender: categorical(raw.policy_holder_gender.as_deref()),
        policy_holder_residence_city: categorical(raw.policy_holder_residence_city.as_deref()),
        policy_holder_residence_region: categorical(raw.policy_holder_residence_region.as_deref()),
        policy_holder_zipcode: to_zipcode(row, raw.policy_holder_zipcode)?,
        policy_holder_residence_latitude: optional_number(raw.policy_holder_residence_latitude),
        policy_holder_residence_longitude: optional_number(raw.policy_holder_residence_longitude),
        policy_holder_bonus_clas: to_bonus_class(row, raw.policy_holder_bonus_clas)?,
        vehicle_brand: categorical(raw.vehicle_brand.as_deref()),
        vehicle_model: categorical(raw.vehicle_model.as_deref()),
        vehicle_make_year: to_make_year(row, raw.vehicle_make_year)?,
        vehicle_tarif_class: categorical(raw.vehicle_tarif_class.as_deref()),
        vehicle_value_brl: optional_number(raw.vehicle_value_brl),
    })
}

/// Validate that a float-like value holds an exact integer
///
/// **Public** - the "validate then coerce" precondition for integer columns
///
/// # Errors
/// * `MissingValue` - None or NaN
/// * `OutOfRange` - infinite or beyond i64
/// * `NonIntegral` - non-zero fractional remainder
pub fn check_integral(
    row: usize,
    column: &'static str,
    value: Option<f64>,
) -> Result<i64, NormalizationError> {
    let value = require_number(row, column, value)?;

    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return Err(NormalizationError::OutOfRange { row, column, value });
    }

    let remainder = (value % 1.0).abs();
    if remainder != 0.0 {
        return Err(NormalizationError::NonIntegral {
            row,
            column,
            value,
            remainder,
        });
    }

    Ok(value as i64)
}

/// Non-negative integer count (claims reported and paid)
fn to_count(row: usize, column: &'static str, value: Option<f64>) -> Result<u32, NormalizationError> {
    let integral = check_integral(row, column, value)?;
    u32::try_from(integral).map_err(|_| NormalizationError::OutOfRange {
        row,
        column,
        value: integral as f64,
    })
}

/// Zip codes are identifiers: validated as integers, stored as text
fn to_zipcode(row: usize, value: Option<f64>) -> Result<String, NormalizationError> {
    check_integral(row, "policy_holder_zipcode", value).map(|zip| zip.to_string())
}

/// Bonus class tolerates missing values
fn to_bonus_class(row: usize, value: Option<f64>) -> Result<BonusClass, NormalizationError> {
    match value {
        None => Ok(BonusClass::Unassigned),
        Some(v) if v.is_nan() => Ok(BonusClass::Unassigned),
        Some(_) => check_integral(row, "policy_holder_bonus_clas", value).map(BonusClass::Class),
    }
}

/// Manufacture year becomes a year-precision date (January 1st)
fn to_make_year(row: usize, value: Option<f64>) -> Result<NaiveDate, NormalizationError> {
    let column = "vehicle_make_year";
    let year = check_integral(row, column, value)?;

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .ok_or(NormalizationError::OutOfRange {
            row,
            column,
            value: year as f64,
        })
}

/// Parse a date cell, accepting plain dates, compact dates and timestamps
///
/// **Public** - shared with tests and the describe command
pub fn parse_date(row: usize, column: &'static str, value: &str) -> Result<NaiveDate, NormalizationError> {
    let value = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }

    Err(NormalizationError::InvalidDate {
        row,
        column,
        value: value.to_string(),
    })
}

fn require_text<'a>(
    row: usize,
    column: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, NormalizationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(NormalizationError::MissingValue { row, column })
}

/// A present, finite number
fn require_number(row: usize, column: &'static str, value: Option<f64>) -> Result<f64, NormalizationError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) if !v.is_nan() => Err(NormalizationError::OutOfRange { row, column, value: v }),
        _ => Err(NormalizationError::MissingValue { row, column }),
    }
}

fn optional_number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Missing categorical values become their own explicit group
fn categorical(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_LABEL).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawPolicy {
        RawPolicy {
            policy_id: Some("p1".to_string()),
            policy_start_date: Some("2019-01-01".to_string()),
            policy_exposure_days: Some(365.0),
            policy_premium_received_brl: Some(100.0),
            policy_claims_num_reported: Some(2.0),
            policy_claims_num_paid: Some(1.0),
            policy_claims_total_amount_paid_brl: Some(10.0),
            policy_holder_birth_date: Some("1980-05-12".to_string()),
            policy_holder_gender: Some("F".to_string()),
            policy_holder_residence_city: Some("Campinas".to_string()),
            policy_holder_residence_region: Some("SP".to_string()),
            policy_holder_zipcode: Some(12345.0),
            policy_holder_residence_latitude: Some(-22.9),
            policy_holder_residence_longitude: Some(-47.06),
            policy_holder_bonus_clas: Some(3.0),
            vehicle_brand: Some("Fiat".to_string()),
            vehicle_model: Some("Uno".to_string()),
            vehicle_make_year: Some(2010.0),
            vehicle_tarif_class: Some("A".to_string()),
            vehicle_value_brl: Some(25000.0),
        }
    }

    #[test]
    fn test_normalize_record() {
        let record = normalize_record(1, &raw()).unwrap();

        assert_eq!(record.policy_holder_zipcode, "12345");
        assert_eq!(record.policy_holder_bonus_clas, BonusClass::Class(3));
        assert_eq!(record.policy_claims_num_reported, 2);
        assert_eq!(record.policy_claims_num_paid, 1);
        assert_eq!(record.policy_exposure_days, 365.0);
        assert_eq!(record.vehicle_make_year, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(record.policy_start_date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
    }

    #[test]
    fn test_fractional_zipcode_rejected() {
        let mut input = raw();
        input.policy_holder_zipcode = Some(12345.5);

        let err = normalize_record(4, &input).unwrap_err();
        assert_eq!(err.column(), "policy_holder_zipcode");
        assert!(matches!(err, NormalizationError::NonIntegral { row: 4, remainder, .. } if remainder == 0.5));
    }

    #[test]
    fn test_missing_bonus_class_is_unassigned() {
        let mut input = raw();
        input.policy_holder_bonus_clas = None;
        assert_eq!(
            normalize_record(1, &input).unwrap().policy_holder_bonus_clas,
            BonusClass::Unassigned
        );

        input.policy_holder_bonus_clas = Some(f64::NAN);
        assert_eq!(
            normalize_record(1, &input).unwrap().policy_holder_bonus_clas,
            BonusClass::Unassigned
        );
    }

    #[test]
    fn test_fractional_bonus_class_rejected() {
        let mut input = raw();
        input.policy_holder_bonus_clas = Some(2.25);
        let err = normalize_record(1, &input).unwrap_err();
        assert_eq!(err.column(), "policy_holder_bonus_clas");
    }

    #[test]
    fn test_fractional_claim_count_rejected() {
        let mut input = raw();
        input.policy_claims_num_paid = Some(1.5);
        let err = normalize_record(1, &input).unwrap_err();
        assert_eq!(err.column(), "policy_claims_num_paid");
    }

    #[test]
    fn test_negative_count_out_of_range() {
        let mut input = raw();
        input.policy_claims_num_reported = Some(-1.0);
        let err = normalize_record(1, &input).unwrap_err();
        assert!(matches!(err, NormalizationError::OutOfRange { .. }));
    }

    #[test]
    fn test_malformed_date_names_column() {
        let mut input = raw();
        input.policy_holder_birth_date = Some("not-a-date".to_string());
        let err = normalize_record(9, &input).unwrap_err();

        assert_eq!(err.column(), "policy_holder_birth_date");
        assert_eq!(
            err.to_string(),
            "Row 9, column 'policy_holder_birth_date': cannot parse date 'not-a-date'"
        );
    }

    #[test]
    fn test_missing_premium_rejected() {
        let mut input = raw();
        input.policy_premium_received_brl = None;
        let err = normalize_record(1, &input).unwrap_err();
        assert_eq!(
            err,
            NormalizationError::MissingValue {
                row: 1,
                column: "policy_premium_received_brl"
            }
        );
    }

    #[test]
    fn test_infinite_amounts_rejected() {
        let mut input = raw();
        input.policy_claims_total_amount_paid_brl = Some(f64::INFINITY);
        let err = normalize_record(3, &input).unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::OutOfRange {
                row: 3,
                column: "policy_claims_total_amount_paid_brl",
                ..
            }
        ));

        let mut input = raw();
        input.policy_premium_received_brl = Some(f64::NEG_INFINITY);
        let err = normalize_record(1, &input).unwrap_err();
        assert_eq!(err.column(), "policy_premium_received_brl");
    }

    #[test]
    fn test_fractional_exposure_days_kept() {
        let mut input = raw();
        input.policy_exposure_days = Some(182.5);
        let record = normalize_record(1, &input).unwrap();
        assert_eq!(record.policy_exposure_days, 182.5);

        input.policy_exposure_days = Some(f64::INFINITY);
        assert!(normalize_record(1, &input).is_err());
    }

    #[test]
    fn test_missing_categorical_gets_marker() {
        let mut input = raw();
        input.vehicle_brand = None;
        let record = normalize_record(1, &input).unwrap();
        assert_eq!(record.vehicle_brand, MISSING_LABEL);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1980, 5, 12).unwrap();
        assert_eq!(parse_date(1, "d", "1980-05-12").unwrap(), expected);
        assert_eq!(parse_date(1, "d", "19800512").unwrap(), expected);
        assert_eq!(parse_date(1, "d", "1980-05-12 00:00:00").unwrap(), expected);
        assert_eq!(parse_date(1, "d", "1980-05-12T13:45:00").unwrap(), expected);
        assert_eq!(parse_date(1, "d", "1980-05-12T00:00:00Z").unwrap(), expected);
        assert!(parse_date(1, "d", "12 May 1980").is_err());
    }

    #[test]
    fn test_check_integral() {
        assert_eq!(check_integral(1, "c", Some(12345.0)).unwrap(), 12345);
        assert_eq!(check_integral(1, "c", Some(-3.0)).unwrap(), -3);
        assert!(check_integral(1, "c", Some(0.1)).is_err());
        assert!(check_integral(1, "c", Some(f64::INFINITY)).is_err());
        assert!(check_integral(1, "c", None).is_err());
    }
}
