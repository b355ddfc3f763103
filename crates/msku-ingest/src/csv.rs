//! CSV reading and writing.
//!
//! Every column is read as a string. Marketplace identifiers such as
//! `0012345678` or `1234` must keep their exact text, and type inference would
//! turn them into integers.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a CSV file with a single header row into a DataFrame of string
/// columns. Empty cells become nulls.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV"
    );
    Ok(df)
}

/// Writes `df` to `path` as CSV with a header row.
pub fn write_csv_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let write_err = |message: String| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .map_err(|e| write_err(e.to_string()))?;

    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
