//! Recoding table for the BRFSS extract.
//!
//! Operation order matters: `age` is derived before `health_coverage`, which
//! reads it.

use super::{EligibilityPredicate, FieldOp, Predicate, RecodingRule, RuleTable, SentinelMap};
use crate::constants::{
    HOUSEHOLD_EXPOSURES, MEDICARE_AGE, MENTAL_STATUS_COLUMN, PHYSICAL_STATUS_COLUMN,
    REQUIRED_COLUMNS, STATUS_UNKNOWN_CODE, TREATMENT_COLUMN, TREATMENT_MAX_CODE,
    YES_NO_CONDITIONS, labels, sentinels,
};
use crate::error::Result;

impl RuleTable {
    /// The rule table for the BRFSS diabetes-education extract
    pub fn brfss() -> Result<Self> {
        RuleTable::new(
            REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            eligibility(),
            operations(),
        )
    }
}

/// Drop respondents with unknown treatment or unknown outcomes
fn eligibility() -> Vec<EligibilityPredicate> {
    vec![
        EligibilityPredicate::at_most(TREATMENT_COLUMN, TREATMENT_MAX_CODE),
        EligibilityPredicate::not_equal(PHYSICAL_STATUS_COLUMN, STATUS_UNKNOWN_CODE),
        EligibilityPredicate::not_equal(MENTAL_STATUS_COLUMN, STATUS_UNKNOWN_CODE),
    ]
}

fn yes_no() -> RecodingRule {
    RecodingRule::codes(&[(1.0, labels::YES), (2.0, labels::NO)])
}

/// Yes/no where an absent answer means the question was skipped as "no"
fn yes_no_or_absent() -> RecodingRule {
    yes_no().missing_as(labels::NO)
}

/// Frequency of current use; absent means not a user
fn use_frequency() -> RecodingRule {
    RecodingRule::codes(&[(1.0, "often"), (2.0, "sometimes"), (3.0, labels::NONE)])
        .missing_as(labels::NONE)
}

/// Health-day counts: 88 is "none", 77 and 99 are don't know / refused
fn day_count() -> SentinelMap {
    SentinelMap::new()
        .code_to_value(sentinels::NONE, 0.0)
        .code_to_missing(sentinels::DONT_KNOW)
        .code_to_missing(sentinels::REFUSED)
}

fn operations() -> Vec<FieldOp> {
    let mut ops = vec![
        // Response variables
        FieldOp::rename(PHYSICAL_STATUS_COLUMN, "phys_health_status"),
        FieldOp::rename(MENTAL_STATUS_COLUMN, "ment_health_status"),
        FieldOp::normalize("PHYSHLTH", "phys_health_days", day_count()),
        FieldOp::normalize("MENTHLTH", "ment_health_days", day_count()),
        // Treatment variables
        FieldOp::recode(
            "PERSDOC2",
            "personal_doctor",
            RecodingRule::codes(&[(1.0, "only_one"), (2.0, "more_than_one"), (3.0, labels::NO)]),
        ),
        FieldOp::recode(TREATMENT_COLUMN, "diabetes_course", yes_no()),
        // Demographics
        FieldOp::rename("_AGE80", "age"),
        FieldOp::recode(
            "SEXVAR",
            "sex",
            RecodingRule::codes(&[(1.0, "male"), (2.0, "female")]),
        ),
        FieldOp::recode(
            "QSTLANG",
            "language",
            RecodingRule::codes(&[(1.0, "english"), (2.0, "spanish")]),
        ),
        FieldOp::recode(
            "_IMPRACE",
            "race",
            RecodingRule::codes(&[
                (1.0, "white"),
                (2.0, "black"),
                (3.0, "asian"),
                (4.0, "native"),
                (5.0, "hispanic"),
                (6.0, labels::OTHER),
            ]),
        ),
        FieldOp::recode(
            "VETERAN3",
            "veteran",
            RecodingRule::codes(&[
                (1.0, labels::YES),
                (2.0, labels::NO),
                (sentinels::DONT_KNOW_SHORT, labels::UNKNOWN),
                (sentinels::REFUSED_SHORT, labels::UNKNOWN),
            ]),
        ),
        FieldOp::recode(
            "_BMI5CAT",
            "bmi",
            RecodingRule::codes(&[
                (1.0, "underweight"),
                (2.0, "normal"),
                (3.0, "overweight"),
                (4.0, "obese"),
            ]),
        ),
        // Socio-economics
        FieldOp::recode("_METSTAT", "metro", yes_no()),
        FieldOp::recode(
            "MSCODE",
            "metro_granular",
            RecodingRule::codes(&[
                (1.0, "city_center"),
                (2.0, "city"),
                (3.0, "county"),
                (5.0, "outside"),
            ]),
        ),
        FieldOp::recode(
            "EDUCA",
            "education",
            RecodingRule::codes(&[
                (1.0, "no_high_school"),
                (2.0, "no_high_school"),
                (3.0, "high_school_some"),
                (4.0, "high_school_graduate"),
                (5.0, "college_some"),
                (6.0, "college_graduate"),
            ]),
        ),
        FieldOp::recode(
            "EMPLOY1",
            "employment",
            RecodingRule::codes(&[
                (1.0, "employed"),
                (2.0, "employed"),
                (3.0, "unemployed"),
                (4.0, "unemployed"),
                (5.0, "non_labor_force"),
                (6.0, "non_labor_force"),
                (7.0, "non_labor_force"),
                (8.0, "non_labor_force"),
            ]),
        ),
        FieldOp::recode(
            "INCOME2",
            "income",
            RecodingRule::codes(&[
                (1.0, "poverty"),
                (2.0, "poverty"),
                (3.0, "low"),
                (4.0, "low"),
                (5.0, "low"),
                (6.0, "middle"),
                (7.0, "middle"),
                (8.0, "high"),
            ]),
        ),
        // Relationships
        FieldOp::recode(
            "MARITAL",
            "partner",
            RecodingRule::codes(&[
                (1.0, "couple"),
                (2.0, "single"),
                (3.0, "single"),
                (4.0, "single"),
                (5.0, "single"),
                (6.0, "couple"),
            ]),
        ),
        FieldOp::recode(
            "CHILDREN",
            "children",
            RecodingRule::new(labels::UNMAPPED)
                .when(Predicate::Equals(sentinels::NONE), labels::NONE)
                .when(Predicate::Equals(1.0), "one")
                .when(Predicate::Equals(2.0), "two")
                .when(Predicate::Between { min: 3.0, max: 4.0 }, "three_to_four")
                .when(Predicate::Between { min: 5.0, max: 87.0 }, "five_plus"),
        ),
    ];

    ops.extend(
        HOUSEHOLD_EXPOSURES
            .iter()
            .map(|(raw, output)| FieldOp::recode(*raw, *output, yes_no_or_absent())),
    );

    ops.extend([
        // Lifestyle
        FieldOp::recode("EXERANY2", "exercise_past_month", yes_no()),
        FieldOp::recode(
            "SLEPTIM1",
            "sleep",
            RecodingRule::new(labels::UNMAPPED)
                .when(Predicate::LessThan(5.0), "very_low")
                .when(Predicate::InRange { min: 5.0, max: 7.0 }, "low")
                .when(Predicate::InRange { min: 7.0, max: 10.0 }, "healthy")
                .when(Predicate::InRange { min: 10.0, max: 25.0 }, "very_high"),
        ),
        FieldOp::recode("SMOKE100", "ever_smoked_100", yes_no()),
        FieldOp::recode("SMOKDAY2", "current_smoker", use_frequency()),
        FieldOp::recode("ECIGARET", "ever_e_smoked", yes_no_or_absent()),
        FieldOp::recode("ECIGNOW", "current_e_smoker", use_frequency()),
        FieldOp::normalize(
            "AVEDRNK3",
            "average_alcohol_month",
            SentinelMap::new()
                .missing_to_value(0.0)
                .code_to_missing(sentinels::REFUSED)
                .code_to_missing(sentinels::DONT_KNOW),
        ),
    ]);

    // Health conditions and disabilities
    ops.extend(
        YES_NO_CONDITIONS
            .iter()
            .map(|(raw, output)| FieldOp::recode(*raw, *output, yes_no())),
    );

    ops.extend([
        FieldOp::recode("ASTHNOW", "current_asthma", yes_no_or_absent()),
        FieldOp::recode(
            "DIABETE4",
            "diabetes",
            RecodingRule::codes(&[
                (1.0, labels::YES),
                (2.0, labels::NO),
                (3.0, labels::NO),
                (4.0, "borderline"),
            ]),
        ),
        FieldOp::recode("CIMEMLOS", "cognitive_decline", yes_no_or_absent()),
        FieldOp::recode("PREGNANT", "pregnant", yes_no_or_absent()),
        // Cancer history
        FieldOp::recode(
            "CNCRDIFF",
            "number_cancers",
            RecodingRule::codes(&[(1.0, "one"), (2.0, "two"), (3.0, "three")])
                .missing_as("zero"),
        ),
        FieldOp::recode("CNCRTYP1", "cancer_type", cancer_type()),
        // Health system usage
        FieldOp::recode(
            "_HCVU651",
            "health_coverage",
            RecodingRule::new(labels::UNMAPPED)
                .when_column("age", Predicate::AtLeast(MEDICARE_AGE), labels::OVER_65)
                .when(Predicate::Equals(1.0), labels::YES)
                .when(Predicate::Equals(2.0), labels::NO),
        ),
    ]);

    ops
}

/// Cancer type groups
///
/// Don't know / refused map to the empty label while valid codes outside
/// every group fall through to `other`; the two outcomes stay distinct.
fn cancer_type() -> RecodingRule {
    RecodingRule::new(labels::OTHER)
        .when(Predicate::OneOf(vec![1.0]), "breast")
        .when(Predicate::OneOf(vec![2.0, 3.0, 4.0]), "cerv_endo_ovar")
        .when(Predicate::OneOf(vec![10.0]), "colon")
        .when(Predicate::OneOf(vec![19.0, 20.0]), "prostate")
        .when(Predicate::OneOf(vec![21.0, 22.0]), "skin")
        .when(
            Predicate::OneOf(vec![sentinels::DONT_KNOW, sentinels::REFUSED]),
            labels::UNMAPPED,
        )
        .missing_as(labels::NONE)
}
