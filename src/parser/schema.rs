//! Policy record schema definitions.
//!
//! `RawPolicy` mirrors the input file as read: every cell optional, integer
//! columns still float-like. `PolicyRecord` is the normalized form, with its
//! fields declared in canonical column order so serialization emits that order.

use crate::utils::config::MISSING_LABEL;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// One policy row exactly as loaded from the dataset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPolicy {
    pub policy_id: Option<String>,
    pub policy_start_date: Option<String>,
    pub policy_exposure_days: Option<f64>,
    pub policy_premium_received_brl: Option<f64>,
    pub policy_claims_num_reported: Option<f64>,
    pub policy_claims_num_paid: Option<f64>,
    pub policy_claims_total_amount_paid_brl: Option<f64>,
    pub policy_holder_birth_date: Option<String>,
    pub policy_holder_gender: Option<String>,
    pub policy_holder_residence_city: Option<String>,
    pub policy_holder_residence_region: Option<String>,
    pub policy_holder_zipcode: Option<f64>,
    pub policy_holder_residence_latitude: Option<f64>,
    pub policy_holder_residence_longitude: Option<f64>,
    pub policy_holder_bonus_clas: Option<f64>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_make_year: Option<f64>,
    pub vehicle_tarif_class: Option<String>,
    pub vehicle_value_brl: Option<f64>,
}

impl RawPolicy {
    /// Presence flags in canonical column order.
    /// NaN counts as missing, the same way a float null reads back.
    pub fn missing_flags(&self) -> [bool; 20] {
        fn num(v: Option<f64>) -> bool {
            v.map_or(true, f64::is_nan)
        }
        [
            self.policy_id.is_none(),
            self.policy_start_date.is_none(),
            num(self.policy_exposure_days),
            num(self.policy_premium_received_brl),
            num(self.policy_claims_num_reported),
            num(self.policy_claims_num_paid),
            num(self.policy_claims_total_amount_paid_brl),
            self.policy_holder_birth_date.is_none(),
            self.policy_holder_gender.is_none(),
            self.policy_holder_residence_city.is_none(),
            self.policy_holder_residence_region.is_none(),
            num(self.policy_holder_zipcode),
            num(self.policy_holder_residence_latitude),
            num(self.policy_holder_residence_longitude),
            num(self.policy_holder_bonus_clas),
            self.vehicle_brand.is_none(),
            self.vehicle_model.is_none(),
            num(self.vehicle_make_year),
            self.vehicle_tarif_class.is_none(),
            num(self.vehicle_value_brl),
        ]
    }
}

/// Policy holder bonus class: a small integer tier, possibly absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BonusClass {
    Unassigned,
    Class(i64),
}

impl BonusClass {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BonusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str(MISSING_LABEL),
            Self::Class(class) => write!(f, "{}", class),
        }
    }
}

impl From<BonusClass> for String {
    fn from(value: BonusClass) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BonusClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == MISSING_LABEL {
            return Ok(Self::Unassigned);
        }
        value
            .parse::<i64>()
            .map(Self::Class)
            .map_err(|e| format!("invalid bonus class '{}': {}", value, e))
    }
}

/// A normalized policy record, fields in canonical column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub policy_id: String,
    pub policy_start_date: NaiveDate,
    pub policy_exposure_days: f64,
    pub policy_premium_received_brl: f64,
    pub policy_claims_num_reported: u32,
    pub policy_claims_num_paid: u32,
    pub policy_claims_total_amount_paid_brl: f64,
    pub policy_holder_birth_date: NaiveDate,
    pub policy_holder_gender: String,
    pub policy_holder_residence_city: String,
    pub policy_holder_residence_region: String,
    pub policy_holder_zipcode: String,
    pub policy_holder_residence_latitude: Option<f64>,
    pub policy_holder_residence_longitude: Option<f64>,
    pub policy_holder_bonus_clas: BonusClass,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    /// Year precision: always January 1st
    pub vehicle_make_year: NaiveDate,
    pub vehicle_tarif_class: String,
    pub vehicle_value_brl: Option<f64>,
}

/// Categorical columns a portfolio can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalColumn {
    #[serde(rename = "policy_holder_gender")]
    Gender,
    #[serde(rename = "policy_holder_residence_city")]
    City,
    #[serde(rename = "policy_holder_residence_region")]
    Region,
    #[serde(rename = "policy_holder_zipcode")]
    Zipcode,
    #[serde(rename = "policy_holder_bonus_clas")]
    BonusClass,
    #[serde(rename = "vehicle_brand")]
    VehicleBrand,
    #[serde(rename = "vehicle_model")]
    VehicleModel,
    #[serde(rename = "vehicle_tarif_class")]
    TariffClass,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 8] = [
        Self::Gender,
        Self::City,
        Self::Region,
        Self::Zipcode,
        Self::BonusClass,
        Self::VehicleBrand,
        Self::VehicleModel,
        Self::TariffClass,
    ];

    /// Source column name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gender => "policy_holder_gender",
            Self::City => "policy_holder_residence_city",
            Self::Region => "policy_holder_residence_region",
            Self::Zipcode => "policy_holder_zipcode",
            Self::BonusClass => "policy_holder_bonus_clas",
            Self::VehicleBrand => "vehicle_brand",
            Self::VehicleModel => "vehicle_model",
            Self::TariffClass => "vehicle_tarif_class",
        }
    }

    /// Value of this column for one record
    pub fn value<'a>(&self, record: &'a PolicyRecord) -> Cow<'a, str> {
        match self {
            Self::Gender => Cow::Borrowed(&record.policy_holder_gender),
            Self::City => Cow::Borrowed(&record.policy_holder_residence_city),
            Self::Region => Cow::Borrowed(&record.policy_holder_residence_region),
            Self::Zipcode => Cow::Borrowed(&record.policy_holder_zipcode),
            Self::BonusClass => Cow::Owned(record.policy_holder_bonus_clas.label()),
            Self::VehicleBrand => Cow::Borrowed(&record.vehicle_brand),
            Self::VehicleModel => Cow::Borrowed(&record.vehicle_model),
            Self::TariffClass => Cow::Borrowed(&record.vehicle_tarif_class),
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
