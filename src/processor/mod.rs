//! Cleaning pipeline orchestration.
//!
//! Sequences the stages of a run: column selection, eligibility filtering,
//! then every field operation of the rule table in declared order. The
//! transform itself ([`clean_survey`]) is a pure function of the source table
//! and the rule table; [`SurveyProcessor`] wraps it with loading, writing
//! and reporting.

pub mod filter;
pub mod reader;
pub mod recoder;
pub mod sentinel;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use self::filter::apply_eligibility;
pub use self::reader::read_survey_csv;
pub use self::recoder::apply_recoding_rule;
pub use self::sentinel::normalize_sentinels;
use self::writer::OutputWriter;

use crate::config::ProcessorConfig;
use crate::error::{CleanerError, Result};
use crate::models::{CleanOutcome, OutputFormat, ProcessingStats, RowCounts};
use crate::rules::{FieldOp, RuleTable};
use crate::schema::{missing_columns, select_required_columns};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Apply a single field operation, retiring its raw column
pub fn apply_field_op(df: DataFrame, op: &FieldOp) -> Result<DataFrame> {
    match op {
        FieldOp::Recode { raw, output, rule } => apply_recoding_rule(df, raw, rule, output),
        FieldOp::Normalize {
            raw,
            output,
            sentinels,
        } => normalize_sentinels(df, raw, sentinels, output),
        FieldOp::Rename { raw, output } => {
            let mut df = df;
            if raw != output {
                df.rename(raw, output.as_str().into())?;
            }
            Ok(df)
        }
    }
}

/// Run the full cleaning transform over a loaded extract
pub fn clean_survey(source: &DataFrame, rules: &RuleTable) -> Result<CleanOutcome> {
    clean_survey_with_progress(source, rules, &ProgressBar::hidden())
}

/// [`clean_survey`], advancing `progress` once per field operation
pub fn clean_survey_with_progress(
    source: &DataFrame,
    rules: &RuleTable,
    progress: &ProgressBar,
) -> Result<CleanOutcome> {
    let selected = select_required_columns(source, rules.required_columns())?;
    let rows_read = selected.height();

    let mut frame = apply_eligibility(selected, rules.eligibility())?;
    let rows_retained = frame.height();

    progress.set_length(rules.operations().len() as u64);
    for op in rules.operations() {
        progress.set_message(op.output().to_string());
        debug!("Applying {} {} -> {}", op.kind(), op.raw(), op.output());
        frame = apply_field_op(frame, op)?;
        progress.inc(1);
    }

    let frame = frame.select(rules.output_columns())?;

    Ok(CleanOutcome {
        frame,
        rows: RowCounts {
            rows_read,
            rows_retained,
        },
        fields_derived: rules.operations().len(),
    })
}

/// Default output location: `<input stem>_clean.<ext>` beside the input
pub fn default_output_path(input_path: &Path, format: OutputFormat) -> PathBuf {
    let stem = input_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    input_path.with_file_name(format!("{}_clean.{}", stem, format.extension()))
}

/// End-to-end processor for one survey extract file
#[derive(Debug)]
pub struct SurveyProcessor {
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    config: ProcessorConfig,
    rules: RuleTable,
}

impl SurveyProcessor {
    /// Create a processor using the BRFSS rule table
    pub fn new(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        if !input_path.exists() {
            return Err(CleanerError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path,
            config: ProcessorConfig::default(),
            rules: RuleTable::brfss()?,
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the rule table
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => default_output_path(&self.input_path, self.config.output_format),
        }
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        self.config.validate()?;
        let start_time = Instant::now();
        let output_path = self.output_path();

        println!("{}", "Starting survey cleaning".bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), self.input_path.display());

        let source = read_survey_csv(&self.input_path, self.config.infer_schema_rows)?;
        println!(
            "  {} {} rows, {} columns",
            "Loaded".bright_green(),
            source.height().to_string().bright_white().bold(),
            source.width().to_string().bright_white().bold()
        );

        if self.config.check_only {
            return self.check_schema(&source, output_path, start_time);
        }

        println!("  {} {}", "Output:".bright_cyan(), output_path.display());
        println!("\n{}", "Recoding fields...".bright_yellow());

        let progress = if self.config.show_progress {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut outcome = clean_survey_with_progress(&source, &self.rules, &progress)?;
        progress.finish_with_message("All fields recoded");

        let writer = OutputWriter::new(output_path.clone(), self.config.clone());
        writer.write(&mut outcome.frame)?;

        let stats = ProcessingStats {
            rows_read: outcome.rows.rows_read,
            rows_retained: outcome.rows.rows_retained,
            fields_derived: outcome.fields_derived,
            output_path,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Cleaned {} of {} rows into {}",
            stats.rows_retained,
            stats.rows_read,
            stats.output_path.display()
        );
        report_summary(&stats);

        Ok(stats)
    }

    /// Report the schema check for check-only runs; nothing is written
    fn check_schema(
        &self,
        source: &DataFrame,
        output_path: PathBuf,
        start_time: Instant,
    ) -> Result<ProcessingStats> {
        let missing = missing_columns(source, self.rules.required_columns());
        if !missing.is_empty() {
            println!(
                "  {} {}",
                "Missing columns:".bright_red(),
                missing.join(", ").bright_red().bold()
            );
            return Err(CleanerError::Schema { missing });
        }

        println!(
            "\n{}",
            "Check mode - all required columns present".bright_green()
        );
        Ok(ProcessingStats {
            rows_read: source.height(),
            rows_retained: 0,
            fields_derived: 0,
            output_path,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }
}

fn report_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.rows_read.to_string().bright_white()
    );
    if stats.rows_dropped() > 0 {
        println!(
            "  {} {}",
            "Rows ineligible:".bright_yellow(),
            stats.rows_dropped().to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_retained.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Fields derived:".bright_cyan(),
        stats.fields_derived.to_string().bright_white()
    );
}
