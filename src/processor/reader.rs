//! Survey extract loading.

use crate::error::{CleanerError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Load a survey extract CSV with a header row
///
/// `infer_schema_rows` bounds the rows scanned for type inference; `None`
/// scans the whole file, which avoids mistyping sparse columns.
pub fn read_survey_csv(path: &Path, infer_schema_rows: Option<usize>) -> Result<DataFrame> {
    if !path.exists() {
        return Err(CleanerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_rows)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_header_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("extract.csv");
        fs::write(&path, "SEXVAR,SLEPTIM1\n1,7\n2,\n").unwrap();

        let df = read_survey_csv(&path, None).unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert!(df.column("SLEPTIM1").unwrap().get(1).unwrap().is_null());
    }

    #[test]
    fn missing_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.csv");

        match read_survey_csv(&path, None) {
            Err(CleanerError::InputNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("Expected InputNotFound, got {:?}", other.map(|df| df.shape())),
        }
    }
}
