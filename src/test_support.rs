//! Record builders shared by unit tests.

use crate::parser::{BonusClass, PolicyRecord};
use chrono::NaiveDate;

/// A plausible normalized policy; only the fields under test vary
pub fn policy(id: &str, region: &str, premium: f64, claims: f64) -> PolicyRecord {
    PolicyRecord {
        policy_id: id.to_string(),
        policy_start_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        policy_exposure_days: 365.0,
        policy_premium_received_brl: premium,
        policy_claims_num_reported: 0,
        policy_claims_num_paid: 0,
        policy_claims_total_amount_paid_brl: claims,
        policy_holder_birth_date: NaiveDate::from_ymd_opt(1980, 5, 12).unwrap(),
        policy_holder_gender: "F".to_string(),
        policy_holder_residence_city: "Campinas".to_string(),
        policy_holder_residence_region: region.to_string(),
        policy_holder_zipcode: "13000".to_string(),
        policy_holder_residence_latitude: Some(-22.9),
        policy_holder_residence_longitude: Some(-47.06),
        policy_holder_bonus_clas: BonusClass::Class(1),
        vehicle_brand: "Fiat".to_string(),
        vehicle_model: "Uno".to_string(),
        vehicle_make_year: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        vehicle_tarif_class: "A".to_string(),
        vehicle_value_brl: Some(25000.0),
    }
}
