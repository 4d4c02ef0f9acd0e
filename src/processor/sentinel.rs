//! Sentinel normalization for numeric survey fields.

use super::recoder::retire_raw_column;
use crate::error::Result;
use crate::rules::SentinelMap;
use polars::prelude::*;

/// Replace sentinel codes in `column`, writing the cleaned values to `output`
///
/// Values that match no sentinel pass through unchanged.
pub fn normalize_sentinels(
    df: DataFrame,
    column: &str,
    sentinels: &SentinelMap,
    output: &str,
) -> Result<DataFrame> {
    let normalized = df
        .lazy()
        .with_column(sentinels.to_expr(column).alias(output))
        .collect()?;

    retire_raw_column(normalized, column, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drinks() -> SentinelMap {
        SentinelMap::new()
            .missing_to_value(0.0)
            .code_to_missing(99.0)
            .code_to_missing(77.0)
    }

    fn values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn maps_sentinels_and_passes_other_values() {
        let df = DataFrame::new(vec![Column::new(
            "AVEDRNK3".into(),
            vec![Some(99.0), Some(77.0), None, Some(3.0), Some(0.0)],
        )])
        .unwrap();

        let out = normalize_sentinels(df, "AVEDRNK3", &drinks(), "average_alcohol_month").unwrap();

        assert!(out.column("AVEDRNK3").is_err());
        assert_eq!(
            values(&out, "average_alcohol_month"),
            vec![None, None, Some(0.0), Some(3.0), Some(0.0)]
        );
    }

    #[test]
    fn replacement_is_not_rematched() {
        // 88 -> 0 must not then be caught by a later 0 -> missing entry
        let map = SentinelMap::new()
            .code_to_value(88.0, 0.0)
            .code_to_missing(0.0);
        let df = DataFrame::new(vec![Column::new("days".into(), vec![Some(88.0), Some(0.0)])]).unwrap();

        let out = normalize_sentinels(df, "days", &map, "days").unwrap();

        assert_eq!(values(&out, "days"), vec![Some(0.0), None]);
    }

    #[test]
    fn empty_map_is_identity() {
        let df = DataFrame::new(vec![Column::new("x".into(), vec![Some(1.5), None])]).unwrap();

        let out = normalize_sentinels(df, "x", &SentinelMap::new(), "y").unwrap();

        assert_eq!(values(&out, "y"), vec![Some(1.5), None]);
    }
}
