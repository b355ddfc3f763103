//! Tabular data ingestion for MSKU mapping.
//!
//! - **CSV**: read sales exports into Polars DataFrames with every column kept
//!   as text, and write annotated frames back out.
//! - **Values**: pull a column out as `Option<String>` per row.
//! - **Detection**: find the column that holds product identifiers.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use msku_ingest::{column_values, detect_identifier_column, read_csv_frame};
//!
//! let df = read_csv_frame(Path::new("sales.csv"))?;
//! let column = detect_identifier_column(&df).unwrap_or_default();
//! let skus = column_values(&df, &column)?;
//! ```

mod csv;
mod detection;
mod error;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_frame, write_csv_frame};

// === Column Access ===
pub use values::column_values;

// === Column Detection ===
pub use detection::{
    ColumnDetection, DetectionMethod, DetectionOptions, INDICATOR_GROUPS,
    detect_identifier_column, detect_identifier_column_with, is_identifier_like,
};
