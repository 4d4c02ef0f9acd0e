//! Property tests for the recoding engine through the public API.

use brfss_processor::constants::REQUIRED_COLUMNS;
use brfss_processor::processor::{apply_eligibility, apply_recoding_rule, normalize_sentinels};
use brfss_processor::{RecodingRule, RuleTable, SentinelMap, clean_survey};
use polars::prelude::*;
use proptest::prelude::*;

/// Source frame with every required column; `set` supplies per-column values
fn source_frame(height: usize, set: impl Fn(&str, usize) -> Option<f64>) -> DataFrame {
    let columns = REQUIRED_COLUMNS
        .iter()
        .map(|name| {
            let values: Vec<Option<f64>> = (0..height).map(|row| set(name, row)).collect();
            Column::new((*name).into(), values)
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

fn string_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Survey codes with a bias towards the small integers rules actually cover
fn survey_code() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (0u8..100).prop_map(|c| Some(c as f64)),
        1 => (-100.0f64..100.0).prop_map(Some),
        1 => Just(None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn equality_rule_labels_only_covered_codes(codes in prop::collection::vec(survey_code(), 1..40)) {
        let df = DataFrame::new(vec![Column::new("SEXVAR".into(), codes.clone())]).unwrap();
        let rule = RecodingRule::codes(&[(1.0, "male"), (2.0, "female")]);

        let out = apply_recoding_rule(df, "SEXVAR", &rule, "sex").unwrap();

        let expected: Vec<Option<String>> = codes
            .iter()
            .map(|code| {
                let label = match code {
                    Some(c) if *c == 1.0 => "male",
                    Some(c) if *c == 2.0 => "female",
                    _ => "",
                };
                Some(label.to_string())
            })
            .collect();
        prop_assert_eq!(string_values(&out, "sex"), expected);
    }

    #[test]
    fn recoding_twice_gives_identical_labels(codes in prop::collection::vec(survey_code(), 1..40)) {
        let df = DataFrame::new(vec![Column::new("SLEPTIM1".into(), codes)]).unwrap();
        let table = RuleTable::brfss().unwrap();
        let rule = table
            .operations()
            .iter()
            .find_map(|op| match op {
                brfss_processor::FieldOp::Recode { output, rule, .. } if output == "sleep" => Some(rule.clone()),
                _ => None,
            })
            .unwrap();

        let first = apply_recoding_rule(df.clone(), "SLEPTIM1", &rule, "sleep").unwrap();
        let second = apply_recoding_rule(df, "SLEPTIM1", &rule, "sleep").unwrap();

        prop_assert_eq!(string_values(&first, "sleep"), string_values(&second, "sleep"));
    }

    #[test]
    fn unmatched_values_pass_sentinel_normalization(value in -1000.0f64..1000.0) {
        prop_assume!(value != 77.0 && value != 99.0);
        let map = SentinelMap::new()
            .missing_to_value(0.0)
            .code_to_missing(99.0)
            .code_to_missing(77.0);
        let df = DataFrame::new(vec![Column::new("AVEDRNK3".into(), vec![Some(value)])]).unwrap();

        let out = normalize_sentinels(df, "AVEDRNK3", &map, "average_alcohol_month").unwrap();

        let cleaned = out.column("average_alcohol_month").unwrap().f64().unwrap().get(0);
        prop_assert_eq!(cleaned, Some(value));
    }

    #[test]
    fn seniors_are_over_65_whatever_their_coverage_code(
        age in 65u8..=80,
        coverage in survey_code(),
    ) {
        let source = source_frame(1, |name, _| match name {
            "DIABEDU" | "_PHYS14D" | "_MENT14D" => Some(1.0),
            "_AGE80" => Some(age as f64),
            "_HCVU651" => coverage,
            _ => None,
        });

        let outcome = clean_survey(&source, &RuleTable::brfss().unwrap()).unwrap();

        prop_assert_eq!(
            string_values(&outcome.frame, "health_coverage"),
            vec![Some("over_65".to_string())]
        );
    }

    #[test]
    fn only_eligibility_predicates_remove_rows(
        treatment in prop::collection::vec(survey_code(), 1..30),
        seed in any::<u64>(),
    ) {
        let height = treatment.len();
        let physical = |row: usize| if (seed >> (row % 64)) & 1 == 1 { Some(9.0) } else { Some(1.0) };
        let source = source_frame(height, |name, row| match name {
            "DIABEDU" => treatment[row],
            "_PHYS14D" => physical(row),
            "_MENT14D" => Some(2.0),
            "SEXVAR" => Some((row % 4) as f64),
            _ => None,
        });

        let expected = (0..height)
            .filter(|&row| treatment[row].is_some_and(|t| t <= 2.0) && physical(row) != Some(9.0))
            .count();

        let table = RuleTable::brfss().unwrap();
        let filtered = apply_eligibility(source.clone(), table.eligibility()).unwrap();
        let outcome = clean_survey(&source, &table).unwrap();

        prop_assert_eq!(filtered.height(), expected);
        prop_assert_eq!(outcome.frame.height(), expected);
        prop_assert_eq!(outcome.rows.rows_retained, expected);
        prop_assert_eq!(outcome.rows.rows_read, height);
    }
}
