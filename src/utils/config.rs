//! Configuration and constants for the CLI.

/// Current analysis report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Groups at or above this loss ratio are not listed as opportunities
pub const DEFAULT_MAX_LOSS_RATIO: f64 = 0.30;

/// Birth years before this are reported as implausible (holders older than ~90)
pub const DEFAULT_BIRTH_YEAR_CUTOFF: i32 = 1930;

/// Rendering of a missing categorical value. Never collides with a real class like "0".
pub const MISSING_LABEL: &str = "<NA>";

/// Separator used when a group is keyed by more than one column
pub const KEY_SEPARATOR: &str = " / ";

// Canonical column order of a normalized policy record
pub const CANONICAL_COLUMNS: [&str; 20] = [
    "policy_id",
    "policy_start_date",
    "policy_exposure_days",
    "policy_premium_received_brl",
    "policy_claims_num_reported",
    "policy_claims_num_paid",
    "policy_claims_total_amount_paid_brl",
    "policy_holder_birth_date",
    "policy_holder_gender",
    "policy_holder_residence_city",
    "policy_holder_residence_region",
    "policy_holder_zipcode",
    "policy_holder_residence_latitude",
    "policy_holder_residence_longitude",
    "policy_holder_bonus_clas",
    "vehicle_brand",
    "vehicle_model",
    "vehicle_make_year",
    "vehicle_tarif_class",
    "vehicle_value_brl",
];

/// Date layouts accepted for policy start and holder birth dates
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Timestamp layouts accepted for the same columns (time part is dropped)
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
