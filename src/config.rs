//! Configuration management for a cleaning run.
//!
//! Holds output settings and run modes. The recoding rules themselves are
//! not runtime configuration; see [`crate::rules::RuleTable`].

use crate::error::CleanerError;
use crate::models::OutputFormat;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl std::str::FromStr for CompressionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(format!(
                "unknown compression '{other}' (expected snappy, zstd, lz4 or none)"
            )),
        }
    }
}

/// Settings for one cleaning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Output file format
    pub output_format: OutputFormat,

    /// Parquet compression (ignored for CSV output)
    pub compression: CompressionAlgorithm,

    /// Rows used by the CSV reader to infer column types (None = whole file)
    pub infer_schema_rows: Option<usize>,

    /// Check the input schema then exit without transforming or writing
    pub check_only: bool,

    /// Show a progress bar over field operations
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Csv,
            compression: CompressionAlgorithm::Snappy,
            infer_schema_rows: None,
            check_only: false,
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Enable check-only mode
    pub fn with_check_only(mut self) -> Self {
        self.check_only = true;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_infer_schema_rows(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    /// Reject settings the loader cannot honour
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.infer_schema_rows == Some(0) {
            return Err(CleanerError::Configuration {
                message: "infer_schema_rows must be at least 1; omit it to scan the whole file"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_parses_aliases() {
        assert_eq!(
            "none".parse::<CompressionAlgorithm>(),
            Ok(CompressionAlgorithm::Uncompressed)
        );
        assert_eq!(
            "ZSTD".parse::<CompressionAlgorithm>(),
            Ok(CompressionAlgorithm::Zstd)
        );
        assert!("brotli".parse::<CompressionAlgorithm>().is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ProcessorConfig::default()
            .with_output_format(OutputFormat::Parquet)
            .with_compression(CompressionAlgorithm::Lz4)
            .with_check_only()
            .with_progress(false);

        assert_eq!(config.output_format, OutputFormat::Parquet);
        assert_eq!(config.compression, CompressionAlgorithm::Lz4);
        assert!(config.check_only);
        assert!(!config.show_progress);
        assert_eq!(config.infer_schema_rows, None);
    }

    #[test]
    fn zero_inference_rows_is_rejected() {
        let config = ProcessorConfig::default().with_infer_schema_rows(Some(0));

        assert!(matches!(
            config.validate(),
            Err(CleanerError::Configuration { .. })
        ));
        assert!(ProcessorConfig::default().with_infer_schema_rows(Some(1)).validate().is_ok());
        assert!(ProcessorConfig::default().validate().is_ok());
    }
}
