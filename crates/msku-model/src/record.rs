use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::mapping::{MappingMethod, is_uncategorized};

/// One processed row: the source identifier and its canonical MSKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    /// Zero-based row index in the source dataset.
    pub row: usize,
    /// Raw identifier as read from the source column (untrimmed).
    pub identifier: Option<String>,
    pub msku: String,
    pub processed_at: NaiveDateTime,
    pub method: MappingMethod,
}

impl AnnotatedRecord {
    /// True when the MSKU is a real category rather than a sentinel.
    pub fn is_mapped(&self) -> bool {
        !is_uncategorized(&self.msku)
    }
}
