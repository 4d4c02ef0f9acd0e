//! Core data structures shared across the cleaning pipeline.
//!
//! Defines output formats, per-run statistics and the result of the pure
//! cleaning transform.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output file formats supported by the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    /// Detect output format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_string_lossy().to_lowercase();

        match extension.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "parquet" | "pq" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }

    /// File extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(format!("unknown output format '{other}' (expected csv or parquet)")),
        }
    }
}

/// Row accounting for one run of the cleaning transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub rows_read: usize,
    pub rows_retained: usize,
}

impl RowCounts {
    /// Rows removed by the eligibility filter
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_retained
    }
}

/// Result of the pure cleaning transform
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub frame: DataFrame,
    pub rows: RowCounts,
    pub fields_derived: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub rows_read: usize,
    pub rows_retained: usize,
    pub fields_derived: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_retained)
    }
}
