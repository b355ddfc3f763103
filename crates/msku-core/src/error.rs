//! Batch processing errors.

use msku_ingest::IngestError;
use thiserror::Error;

/// Why a batch was rejected. A failed batch produces no output and leaves the
/// mapping store untouched.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The dataset has no columns at all.
    #[error("dataset has no columns")]
    EmptySchema,

    /// No identifier column was detected and fallback is disabled.
    #[error("no identifier column detected")]
    NoIdentifierColumn,

    /// An explicitly requested column is missing.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for BatchError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<IngestError> for BatchError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::ColumnNotFound { column } => Self::ColumnNotFound { column },
            other => Self::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
