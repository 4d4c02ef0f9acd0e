//! Row eligibility filtering.

use crate::error::Result;
use crate::rules::EligibilityPredicate;
use polars::prelude::*;
use tracing::debug;

/// Keep the rows for which every predicate holds
///
/// Predicates are combined with logical AND. Rows are selected, never
/// modified; their relative order is preserved.
pub fn apply_eligibility(df: DataFrame, predicates: &[EligibilityPredicate]) -> Result<DataFrame> {
    let Some(mask) = predicates
        .iter()
        .map(EligibilityPredicate::to_expr)
        .reduce(|acc, next| acc.and(next))
    else {
        return Ok(df);
    };

    let rows_before = df.height();
    let filtered = df.lazy().filter(mask).collect()?;

    debug!(
        "Eligibility filter kept {} of {} rows ({} predicates)",
        filtered.height(),
        rows_before,
        predicates.len()
    );

    Ok(filtered)
}
