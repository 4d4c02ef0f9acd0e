//! Command-line interface components.

use crate::config::{CompressionAlgorithm, ProcessorConfig};
use crate::models::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brfss")]
#[command(about = "Recode a raw BRFSS survey extract into a labelled analysis dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the raw survey extract (CSV with a header row)
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output file (defaults to <INPUT stem>_clean.<format> beside the input)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Output format (csv, parquet); inferred from --output-path when omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: CompressionAlgorithm,

    /// Rows scanned for CSV type inference (default: whole file)
    #[arg(long)]
    pub infer_schema_rows: Option<usize>,

    /// Check that the extract has every required column, then exit
    #[arg(long)]
    pub check_only: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Output format: explicit flag, else the output extension, else CSV
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output_path
                    .as_deref()
                    .and_then(OutputFormat::from_path)
            })
            .unwrap_or_default()
    }

    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> ProcessorConfig {
        let config = ProcessorConfig::default()
            .with_output_format(self.output_format())
            .with_compression(self.compression)
            .with_infer_schema_rows(self.infer_schema_rows)
            .with_progress(!self.no_progress);

        if self.check_only {
            config.with_check_only()
        } else {
            config
        }
    }

    /// Log filter level for the subscriber
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
