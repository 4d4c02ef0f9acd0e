//! Application constants for the BRFSS processor
//!
//! Raw survey column codes, reserved sentinel values and label strings
//! shared by the rule table and its tests.

// =============================================================================
// Raw Columns
// =============================================================================

/// Raw columns read from the source extract, in output-independent order
pub const REQUIRED_COLUMNS: &[&str] = &[
    // Response variables (health outcomes)
    "_PHYS14D", "_MENT14D", "PHYSHLTH", "MENTHLTH",
    // Demographics
    "_AGE80", "SEXVAR", "QSTLANG", "_IMPRACE", "VETERAN3", "_BMI5CAT", "PREGNANT",
    // Socio-economics
    "_METSTAT", "MSCODE", "EDUCA", "EMPLOY1", "INCOME2",
    // Relationships
    "MARITAL", "CHILDREN", "ACEDEPRS", "ACEDRINK", "ACEDRUGS", "ACEPRISN",
    // Lifestyle
    "EXERANY2", "SLEPTIM1", "SMOKE100", "SMOKDAY2", "AVEDRNK3", "ECIGARET", "ECIGNOW",
    // Health conditions
    "CVDINFR4", "CVDCRHD4", "CVDSTRK3", "ASTHMA3", "ASTHNOW", "CHCCOPD2", "HAVARTH4",
    "ADDEPEV3", "CHCKDNY2", "DIABETE4", "CIMEMLOS",
    // Activities of daily living
    "DECIDE", "DIFFWALK", "DIFFDRES", "DIFFALON",
    // Disabilities
    "DEAF", "BLIND",
    // Health system usage
    "_HCVU651",
    // Cancer history
    "CHCSCNCR", "CHCOCNCR", "CNCRDIFF", "CNCRTYP1",
    // Treatment variables
    "DIABEDU", "PERSDOC2",
];

/// Yes/no condition fields sharing one rule shape: (raw column, output column)
pub const YES_NO_CONDITIONS: &[(&str, &str)] = &[
    ("CHCOCNCR", "ever_any_cancer"),
    ("CHCSCNCR", "ever_skin_cancer"),
    ("CVDINFR4", "cvd"),
    ("CVDCRHD4", "chd"),
    ("CVDSTRK3", "stroke"),
    ("ASTHMA3", "ever_asthma"),
    ("CHCCOPD2", "copd"),
    ("HAVARTH4", "arthritis"),
    ("ADDEPEV3", "depression"),
    ("CHCKDNY2", "kidney_disease"),
    ("DEAF", "deaf"),
    ("BLIND", "blind"),
    ("DECIDE", "concentration"),
    ("DIFFWALK", "mobility"),
    ("DIFFDRES", "dressing_bathing"),
    ("DIFFALON", "errands"),
];

/// Adverse household experience fields where absence means "not reported"
pub const HOUSEHOLD_EXPOSURES: &[(&str, &str)] = &[
    ("ACEDEPRS", "depressed_household"),
    ("ACEDRINK", "alcohol_household"),
    ("ACEDRUGS", "drugs_household"),
    ("ACEPRISN", "prison_household"),
];

// =============================================================================
// Eligibility
// =============================================================================

/// Treatment column; codes above this are don't know / refused
pub const TREATMENT_COLUMN: &str = "DIABEDU";
pub const TREATMENT_MAX_CODE: f64 = 2.0;

/// Computed health-status columns use 9 for "don't know / refused / missing"
pub const PHYSICAL_STATUS_COLUMN: &str = "_PHYS14D";
pub const MENTAL_STATUS_COLUMN: &str = "_MENT14D";
pub const STATUS_UNKNOWN_CODE: f64 = 9.0;

// =============================================================================
// Sentinel Codes
// =============================================================================

/// Reserved survey codes with non-measurement meaning
pub mod sentinels {
    /// "Don't know / not sure" for two-digit fields
    pub const DONT_KNOW: f64 = 77.0;

    /// "None" for day-count and child-count fields
    pub const NONE: f64 = 88.0;

    /// "Refused" for two-digit fields
    pub const REFUSED: f64 = 99.0;

    /// "Don't know / not sure" for one-digit fields
    pub const DONT_KNOW_SHORT: f64 = 7.0;

    /// "Refused" for one-digit fields
    pub const REFUSED_SHORT: f64 = 9.0;
}

// =============================================================================
// Labels
// =============================================================================

/// Output labels reused across many rules
pub mod labels {
    /// Default label for codes no branch covers
    pub const UNMAPPED: &str = "";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const NONE: &str = "none";
    pub const UNKNOWN: &str = "unknown";
    pub const OTHER: &str = "other";
    pub const OVER_65: &str = "over_65";
}

/// Age at or above which health coverage is labelled `over_65`
pub const MEDICARE_AGE: f64 = 65.0;
