use chrono::NaiveDateTime;
use msku_ingest::DetectionOptions;

pub const DEFAULT_MSKU_COLUMN: &str = "MSKU";
pub const DEFAULT_PROCESSED_AT_COLUMN: &str = "processed_at";
pub const DEFAULT_METHOD_COLUMN: &str = "mapping_method";

/// Timestamp layout of the `processed_at` column.
pub const PROCESSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    /// Name of the added canonical identifier column.
    pub msku_column: String,
    pub processed_at_column: String,
    pub method_column: String,
    /// Use this column instead of detecting one.
    pub identifier_column: Option<String>,
    /// Fail instead of falling back to the first column.
    pub require_detected_column: bool,
    pub detection: DetectionOptions,
    /// Fixed batch timestamp; the current local time when unset.
    pub processed_at: Option<NaiveDateTime>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            msku_column: DEFAULT_MSKU_COLUMN.to_string(),
            processed_at_column: DEFAULT_PROCESSED_AT_COLUMN.to_string(),
            method_column: DEFAULT_METHOD_COLUMN.to_string(),
            identifier_column: None,
            require_detected_column: false,
            detection: DetectionOptions::default(),
            processed_at: None,
        }
    }
}

impl ProcessingOptions {
    pub fn with_identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = Some(column.into());
        self
    }

    pub fn with_require_detected_column(mut self, require: bool) -> Self {
        self.require_detected_column = require;
        self
    }

    pub fn with_detection(mut self, detection: DetectionOptions) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_processed_at(mut self, processed_at: NaiveDateTime) -> Self {
        self.processed_at = Some(processed_at);
        self
    }
}
