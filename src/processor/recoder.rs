//! Field recoding: raw survey codes to labelled columns.

use crate::error::Result;
use crate::rules::RecodingRule;
use polars::prelude::*;

/// Replace `raw` with `output`, labelled by `rule`
///
/// Every row receives a label: the first matching branch, or the rule's
/// default. Columns the rule reads through cross-field branches must already
/// be present in `df`.
pub fn apply_recoding_rule(
    df: DataFrame,
    raw: &str,
    rule: &RecodingRule,
    output: &str,
) -> Result<DataFrame> {
    let recoded = df
        .lazy()
        .with_column(rule.to_expr(raw).alias(output))
        .collect()?;

    retire_raw_column(recoded, raw, output)
}

/// Drop the raw column once its derived column exists
pub(crate) fn retire_raw_column(df: DataFrame, raw: &str, output: &str) -> Result<DataFrame> {
    if raw == output {
        return Ok(df);
    }
    Ok(df.drop(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Predicate;

    fn labels(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn replaces_raw_column_with_labels() {
        let df = DataFrame::new(vec![
            Column::new("id".into(), vec![1i32, 2, 3, 4]),
            Column::new("SEXVAR".into(), vec![Some(1.0), Some(2.0), Some(7.0), None]),
        ])
        .unwrap();
        let rule = RecodingRule::codes(&[(1.0, "male"), (2.0, "female")]);

        let out = apply_recoding_rule(df, "SEXVAR", &rule, "sex").unwrap();

        assert!(out.column("SEXVAR").is_err());
        assert_eq!(out.height(), 4);
        assert_eq!(labels(&out, "sex"), vec!["male", "female", "", ""]);
    }

    #[test]
    fn cross_field_branch_takes_precedence() {
        let df = DataFrame::new(vec![
            Column::new("age".into(), vec![Some(70.0), Some(40.0), Some(65.0), None]),
            Column::new("_HCVU651".into(), vec![Some(2.0), Some(2.0), None, Some(1.0)]),
        ])
        .unwrap();
        let rule = RecodingRule::new("")
            .when_column("age", Predicate::AtLeast(65.0), "over_65")
            .when(Predicate::Equals(1.0), "yes")
            .when(Predicate::Equals(2.0), "no");

        let out = apply_recoding_rule(df, "_HCVU651", &rule, "health_coverage").unwrap();

        assert_eq!(
            labels(&out, "health_coverage"),
            vec!["over_65", "no", "over_65", "yes"]
        );
        // The referenced column is left in place
        assert!(out.column("age").is_ok());
    }

    #[test]
    fn in_place_recode_keeps_single_column() {
        let df = DataFrame::new(vec![Column::new("flag".into(), vec![Some(1.0), Some(2.0)])]).unwrap();
        let rule = RecodingRule::codes(&[(1.0, "yes"), (2.0, "no")]);

        let out = apply_recoding_rule(df, "flag", &rule, "flag").unwrap();

        assert_eq!(out.width(), 1);
        assert_eq!(labels(&out, "flag"), vec!["yes", "no"]);
    }
}
