//! Error handling for survey cleaning operations.
//!
//! Provides error types with context for input loading, schema checks,
//! rule-table validation and output writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input file not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Required columns missing from source: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid rule definition for '{field}': {reason}")]
    RuleDefinition { field: String, reason: String },

    #[error("Failed to write output file: {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CleanerError {
    pub(crate) fn rule(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RuleDefinition {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
