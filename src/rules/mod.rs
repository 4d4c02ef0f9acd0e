//! Declarative recoding rules.
//!
//! A [`RuleTable`] describes a whole cleaning run: the raw columns to select,
//! the eligibility predicates rows must pass, and the ordered field operations
//! that turn raw survey codes into derived columns. Tables are validated once
//! at construction and never mutated afterwards.
//!
//! Rules compile to polars expressions. Every predicate is evaluated against
//! a nullable `Float64` column; a null value never satisfies a comparison and
//! is only matched by [`Predicate::Missing`].

pub mod brfss;
mod validation;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Test applied to a single raw value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `value == code`
    Equals(f64),
    /// `value` is one of the listed codes
    OneOf(Vec<f64>),
    /// Half-open interval `min <= value < max`
    InRange { min: f64, max: f64 },
    /// Closed interval `min <= value <= max`
    Between { min: f64, max: f64 },
    /// `value < bound`
    LessThan(f64),
    /// `value >= bound`
    AtLeast(f64),
    /// Value is absent
    Missing,
}

impl Predicate {
    /// Build the boolean expression for this predicate over `column`
    pub fn to_expr(&self, column: &str) -> Expr {
        let value = col(column);
        match self {
            Predicate::Equals(code) => value.eq(lit(*code)),
            Predicate::OneOf(codes) => codes
                .iter()
                .map(|code| col(column).eq(lit(*code)))
                .reduce(|acc, next| acc.or(next))
                .unwrap_or_else(|| lit(false)),
            Predicate::InRange { min, max } => {
                value.clone().gt_eq(lit(*min)).and(value.lt(lit(*max)))
            }
            Predicate::Between { min, max } => {
                value.clone().gt_eq(lit(*min)).and(value.lt_eq(lit(*max)))
            }
            Predicate::LessThan(bound) => value.lt(lit(*bound)),
            Predicate::AtLeast(bound) => value.gt_eq(lit(*bound)),
            Predicate::Missing => value.is_null(),
        }
    }

    /// Numeric interval covered by an interval predicate
    pub(crate) fn interval(&self) -> Option<Interval> {
        match *self {
            Predicate::InRange { min, max } => Some(Interval::new(min, true, max, false)),
            Predicate::Between { min, max } => Some(Interval::new(min, true, max, true)),
            Predicate::LessThan(bound) => {
                Some(Interval::new(f64::NEG_INFINITY, false, bound, false))
            }
            Predicate::AtLeast(bound) => Some(Interval::new(bound, true, f64::INFINITY, false)),
            _ => None,
        }
    }
}

/// Interval bounds used when checking a rule for overlapping ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interval {
    pub lower: f64,
    pub lower_closed: bool,
    pub upper: f64,
    pub upper_closed: bool,
}

impl Interval {
    fn new(lower: f64, lower_closed: bool, upper: f64, upper_closed: bool) -> Self {
        Self {
            lower,
            lower_closed,
            upper,
            upper_closed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_nan()
            || self.upper.is_nan()
            || self.lower > self.upper
            || (self.lower == self.upper && !(self.lower_closed && self.upper_closed))
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        let (lower, lower_closed) = if self.lower > other.lower {
            (self.lower, self.lower_closed)
        } else if other.lower > self.lower {
            (other.lower, other.lower_closed)
        } else {
            (self.lower, self.lower_closed && other.lower_closed)
        };
        let (upper, upper_closed) = if self.upper < other.upper {
            (self.upper, self.upper_closed)
        } else if other.upper < self.upper {
            (other.upper, other.upper_closed)
        } else {
            (self.upper, self.upper_closed && other.upper_closed)
        };

        !Interval::new(lower, lower_closed, upper, upper_closed).is_empty()
    }
}

/// One `(condition, label)` pair of a recoding rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Column the predicate reads; `None` means the rule's own raw column
    pub source: Option<String>,
    pub predicate: Predicate,
    pub label: String,
}

impl Branch {
    fn condition(&self, raw: &str) -> Expr {
        self.predicate
            .to_expr(self.source.as_deref().unwrap_or(raw))
    }
}

/// Ordered branches plus a default label; the first matching branch wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecodingRule {
    pub branches: Vec<Branch>,
    pub default: String,
}

impl RecodingRule {
    /// Empty rule that labels every row with `default`
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            branches: Vec::new(),
            default: default.into(),
        }
    }

    /// Equality rule: one branch per code, unmatched codes get the empty label
    pub fn codes(pairs: &[(f64, &str)]) -> Self {
        pairs.iter().fold(
            Self::new(crate::constants::labels::UNMAPPED),
            |rule, (code, label)| rule.when(Predicate::Equals(*code), *label),
        )
    }

    /// Append a branch over the rule's own raw column
    pub fn when(mut self, predicate: Predicate, label: impl Into<String>) -> Self {
        self.branches.push(Branch {
            source: None,
            predicate,
            label: label.into(),
        });
        self
    }

    /// Append a branch that reads a different column
    pub fn when_column(
        mut self,
        column: impl Into<String>,
        predicate: Predicate,
        label: impl Into<String>,
    ) -> Self {
        self.branches.push(Branch {
            source: Some(column.into()),
            predicate,
            label: label.into(),
        });
        self
    }

    /// Append a branch labelling absent values
    pub fn missing_as(self, label: impl Into<String>) -> Self {
        self.when(Predicate::Missing, label)
    }

    /// Columns other than the raw column that this rule reads
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().filter_map(|b| b.source.as_deref())
    }

    /// Compile to a `when/then/otherwise` chain over `raw`
    pub fn to_expr(&self, raw: &str) -> Expr {
        self.branches
            .iter()
            .rev()
            .fold(lit(self.default.as_str()), |otherwise, branch| {
                when(branch.condition(raw))
                    .then(lit(branch.label.as_str()))
                    .otherwise(otherwise)
            })
    }
}

/// Key matched by a sentinel replacement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SentinelKey {
    Code(f64),
    Missing,
}

/// Value written in place of a matched sentinel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Replacement {
    Missing,
    Value(f64),
}

/// Ordered sentinel replacements for a numeric column
///
/// Entries are matched against the original value only, so a replacement
/// is never fed into a later entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentinelMap {
    pub entries: Vec<(SentinelKey, Replacement)>,
}

impl SentinelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_to_missing(mut self, code: f64) -> Self {
        self.entries
            .push((SentinelKey::Code(code), Replacement::Missing));
        self
    }

    pub fn code_to_value(mut self, code: f64, value: f64) -> Self {
        self.entries
            .push((SentinelKey::Code(code), Replacement::Value(value)));
        self
    }

    pub fn missing_to_value(mut self, value: f64) -> Self {
        self.entries
            .push((SentinelKey::Missing, Replacement::Value(value)));
        self
    }

    /// Compile to a `Float64` expression over `column`
    pub fn to_expr(&self, column: &str) -> Expr {
        self.entries
            .iter()
            .rev()
            .fold(col(column), |otherwise, (key, replacement)| {
                let matched = match key {
                    SentinelKey::Code(code) => col(column).eq(lit(*code)),
                    SentinelKey::Missing => col(column).is_null(),
                };
                let replaced = match replacement {
                    Replacement::Missing => lit(NULL).cast(DataType::Float64),
                    Replacement::Value(value) => lit(*value),
                };
                when(matched).then(replaced).otherwise(otherwise)
            })
            .cast(DataType::Float64)
    }
}

/// Row-level eligibility test applied before any recoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityPredicate {
    /// Keep rows with `value <= threshold`; absent values fail
    AtMost { column: String, threshold: f64 },
    /// Keep rows with `value != sentinel`; absent values pass
    NotEqual { column: String, sentinel: f64 },
}

impl EligibilityPredicate {
    pub fn at_most(column: impl Into<String>, threshold: f64) -> Self {
        Self::AtMost {
            column: column.into(),
            threshold,
        }
    }

    pub fn not_equal(column: impl Into<String>, sentinel: f64) -> Self {
        Self::NotEqual {
            column: column.into(),
            sentinel,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::AtMost { column, .. } | Self::NotEqual { column, .. } => column,
        }
    }

    pub fn to_expr(&self) -> Expr {
        match self {
            Self::AtMost { column, threshold } => col(column.as_str()).lt_eq(lit(*threshold)),
            Self::NotEqual { column, sentinel } => col(column.as_str())
                .neq(lit(*sentinel))
                .or(col(column.as_str()).is_null()),
        }
    }
}

/// One raw-column-to-derived-column step of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldOp {
    /// Replace a raw code column with a labelled string column
    Recode {
        raw: String,
        output: String,
        rule: RecodingRule,
    },
    /// Replace sentinel codes in a numeric column and rename it
    Normalize {
        raw: String,
        output: String,
        sentinels: SentinelMap,
    },
    /// Pass a numeric column through under a new name
    Rename { raw: String, output: String },
}

impl FieldOp {
    pub fn recode(raw: impl Into<String>, output: impl Into<String>, rule: RecodingRule) -> Self {
        Self::Recode {
            raw: raw.into(),
            output: output.into(),
            rule,
        }
    }

    pub fn normalize(
        raw: impl Into<String>,
        output: impl Into<String>,
        sentinels: SentinelMap,
    ) -> Self {
        Self::Normalize {
            raw: raw.into(),
            output: output.into(),
            sentinels,
        }
    }

    pub fn rename(raw: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Rename {
            raw: raw.into(),
            output: output.into(),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::Recode { raw, .. } | Self::Normalize { raw, .. } | Self::Rename { raw, .. } => raw,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            Self::Recode { output, .. }
            | Self::Normalize { output, .. }
            | Self::Rename { output, .. } => output,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recode { .. } => "recode",
            Self::Normalize { .. } => "normalize",
            Self::Rename { .. } => "rename",
        }
    }
}

/// Immutable description of a full cleaning run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    required_columns: Vec<String>,
    eligibility: Vec<EligibilityPredicate>,
    operations: Vec<FieldOp>,
}

impl RuleTable {
    /// Build and validate a rule table
    pub fn new(
        required_columns: Vec<String>,
        eligibility: Vec<EligibilityPredicate>,
        operations: Vec<FieldOp>,
    ) -> Result<Self> {
        let table = Self {
            required_columns,
            eligibility,
            operations,
        };
        validation::validate(&table)?;
        Ok(table)
    }

    pub fn required_columns(&self) -> &[String] {
        &self.required_columns
    }

    pub fn eligibility(&self) -> &[EligibilityPredicate] {
        &self.eligibility
    }

    pub fn operations(&self) -> &[FieldOp] {
        &self.operations
    }

    /// Final output schema, in operation order
    pub fn output_columns(&self) -> Vec<&str> {
        self.operations.iter().map(FieldOp::output).collect()
    }
}
