//! BRFSS Processor Library
//!
//! A Rust library for turning raw BRFSS survey extracts, where every column is
//! a numeric instrument code, into a cleaned and labelled dataset ready for
//! analysis.
//!
//! This library provides tools for:
//! - Selecting the raw columns a run needs, failing clearly when any are absent
//! - Dropping respondents who fail the eligibility predicates
//! - Recoding raw codes into categorical labels through a declarative rule table
//! - Converting "don't know" / "refused" / "none" sentinels in numeric fields
//! - Writing the result as CSV or Parquet

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod rules;
pub mod schema;

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use error::{CleanerError, Result};
pub use models::{CleanOutcome, OutputFormat, ProcessingStats};
pub use processor::{SurveyProcessor, clean_survey};
pub use rules::{EligibilityPredicate, FieldOp, Predicate, RecodingRule, RuleTable, SentinelMap};
