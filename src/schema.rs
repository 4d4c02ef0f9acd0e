//! Column selection and raw schema normalization.
//!
//! Projects the loaded extract down to the columns a rule table needs and
//! gives every selected column the raw-code representation the recoder
//! expects: nullable `Float64`, with NaN folded into null.

use crate::error::{CleanerError, Result};
use polars::prelude::*;
use tracing::debug;

/// Restrict `df` to exactly `required`, in that order
///
/// Fails with [`CleanerError::Schema`] naming every absent column. Row count
/// and row order are preserved.
pub fn select_required_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<DataFrame> {
    let missing = missing_columns(df, required);
    if !missing.is_empty() {
        return Err(CleanerError::Schema { missing });
    }

    let selected = df
        .clone()
        .lazy()
        .select(
            required
                .iter()
                .map(|name| to_raw_codes(name.as_ref()))
                .collect::<Vec<_>>(),
        )
        .collect()?;

    debug!(
        "Selected {} of {} source columns over {} rows",
        selected.width(),
        df.width(),
        selected.height()
    );

    Ok(selected)
}

/// Names from `required` that `df` does not contain
pub fn missing_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| df.get_column_index(name).is_none())
        .map(|name: &str| name.to_string())
        .collect()
}

/// Raw-code expression for a source column: strict `Float64`, NaN as null
///
/// A value that cannot be read as a number fails the cast rather than
/// becoming missing.
fn to_raw_codes(name: &str) -> Expr {
    col(name)
        .strict_cast(DataType::Float64)
        .fill_nan(lit(NULL).cast(DataType::Float64))
        .alias(name)
}
