//! Output writing for cleaned survey tables
//!
//! Hands a fully materialized table to the CSV or Parquet writer selected
//! by the run configuration.

use crate::config::ProcessorConfig;
use crate::error::{CleanerError, Result};
use crate::models::OutputFormat;

use polars::prelude::{
    CsvWriter, DataFrame, ParquetWriter as PolarsParquetWriter, SerWriter, StatisticsOptions,
};
use std::path::PathBuf;
use tracing::debug;

/// Writer for the cleaned dataset
#[derive(Debug)]
pub struct OutputWriter {
    output_path: PathBuf,
    config: ProcessorConfig,
}

impl OutputWriter {
    pub fn new(output_path: PathBuf, config: ProcessorConfig) -> Self {
        Self {
            output_path,
            config,
        }
    }

    /// Write `df` in the configured format, creating parent directories
    pub fn write(&self, df: &mut DataFrame) -> Result<usize> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(&self.output_path)?;

        let written = match self.config.output_format {
            OutputFormat::Csv => CsvWriter::new(file).include_header(true).finish(df),
            OutputFormat::Parquet => PolarsParquetWriter::new(file)
                .with_compression(self.config.compression.to_polars_compression())
                .with_statistics(StatisticsOptions::full())
                .finish(df)
                .map(|_| ()),
        };

        written.map_err(|e| CleanerError::WriteFailed {
            path: self.output_path.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            "Wrote {} rows x {} columns to {} ({:?})",
            df.height(),
            df.width(),
            self.output_path.display(),
            self.config.output_format
        );

        Ok(df.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressionAlgorithm;
    use polars::prelude::*;
    use tempfile::TempDir;

    fn cleaned() -> DataFrame {
        DataFrame::new(vec![
            Column::new("sex".into(), vec!["female", "male"]),
            Column::new("age".into(), vec![Some(54.0), None]),
        ])
        .unwrap()
    }

    #[test]
    fn writes_csv_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("clean.csv");
        let writer = OutputWriter::new(path.clone(), ProcessorConfig::default());

        let rows = writer.write(&mut cleaned()).unwrap();

        assert_eq!(rows, 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("sex,age"));
        assert!(lines.next().unwrap().starts_with("female,54"));
        assert_eq!(lines.next(), Some("male,"));
    }

    #[test]
    fn writes_readable_parquet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clean.parquet");
        let config = ProcessorConfig::default()
            .with_output_format(OutputFormat::Parquet)
            .with_compression(CompressionAlgorithm::Zstd);
        let writer = OutputWriter::new(path.clone(), config);

        writer.write(&mut cleaned()).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let back = ParquetReader::new(file).finish().unwrap();
        assert!(back.equals_missing(&cleaned()));
    }
}
