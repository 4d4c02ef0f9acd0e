//! Construction-time checks for rule tables.

use std::collections::HashSet;

use tracing::debug;

use super::{FieldOp, Interval, RecodingRule, RuleTable};
use crate::error::{CleanerError, Result};

/// Check a rule table for definition errors
///
/// Replays the field operations over the set of columns that would exist at
/// each step, so cross-field references are only accepted when the referenced
/// column is present at the point the rule runs.
pub(super) fn validate(table: &RuleTable) -> Result<()> {
    let mut required = HashSet::new();
    for name in &table.required_columns {
        if !required.insert(name.as_str()) {
            return Err(CleanerError::rule(name, "required column listed twice"));
        }
    }

    for predicate in &table.eligibility {
        if !required.contains(predicate.column()) {
            return Err(CleanerError::rule(
                predicate.column(),
                "eligibility predicate reads a column that is not selected",
            ));
        }
    }

    let mut available: HashSet<&str> = required.clone();
    let mut consumed: HashSet<&str> = HashSet::new();

    for op in &table.operations {
        let raw = op.raw();
        let output = op.output();

        if !required.contains(raw) {
            return Err(CleanerError::rule(
                output,
                format!("raw column '{raw}' is not in the required column list"),
            ));
        }
        if !consumed.insert(raw) {
            return Err(CleanerError::rule(
                output,
                format!("raw column '{raw}' was already consumed by an earlier operation"),
            ));
        }

        if let FieldOp::Recode { rule, .. } = op {
            for column in rule.referenced_columns() {
                if !available.contains(column) {
                    return Err(CleanerError::rule(
                        output,
                        format!("condition reads '{column}' which does not exist at this point"),
                    ));
                }
            }
            check_intervals(output, rule)?;
        }

        available.remove(raw);
        if !available.insert(output) {
            return Err(CleanerError::rule(
                output,
                "output column collides with an existing column",
            ));
        }
    }

    let mut unconsumed: Vec<&str> = required.difference(&consumed).copied().collect();
    if !unconsumed.is_empty() {
        unconsumed.sort_unstable();
        return Err(CleanerError::rule(
            unconsumed[0],
            format!(
                "selected columns are never retired: {}",
                unconsumed.join(", ")
            ),
        ));
    }

    debug!(
        "Validated rule table: {} required columns, {} eligibility predicates, {} operations",
        table.required_columns.len(),
        table.eligibility.len(),
        table.operations.len()
    );
    Ok(())
}

/// Reject empty intervals and overlapping intervals over the same column
fn check_intervals(output: &str, rule: &RecodingRule) -> Result<()> {
    let mut seen: Vec<(Option<&str>, Interval)> = Vec::new();

    for branch in &rule.branches {
        let Some(interval) = branch.predicate.interval() else {
            continue;
        };
        if interval.is_empty() {
            return Err(CleanerError::rule(
                output,
                format!("interval for label '{}' is empty", branch.label),
            ));
        }

        let source = branch.source.as_deref();
        if seen
            .iter()
            .any(|(other_source, other)| *other_source == source && other.overlaps(&interval))
        {
            return Err(CleanerError::rule(
                output,
                format!("interval for label '{}' overlaps an earlier interval", branch.label),
            ));
        }
        seen.push((source, interval));
    }

    Ok(())
}
