//! Batch processing of sales data.
//!
//! # Processing order
//!
//! 1. Select the identifier column (explicit, detected, or first column).
//! 2. Classify the unique identifiers and merge the groups into the store.
//! 3. Resolve every row through the store.
//! 4. Append the MSKU, timestamp, and method columns and build the summary.
//!
//! The batch runs against a clone of the caller's store. The clone replaces
//! the caller's store only when every step succeeded.

use chrono::{Local, NaiveDateTime};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use msku_ingest::{ColumnDetection, column_values, detect_identifier_column_with};
use msku_map::MappingStore;
use msku_model::{AnnotatedRecord, ProcessingSummary};

use crate::error::{BatchError, Result};
use crate::observer::{BatchEvent, BatchObserver, NoopObserver};
use crate::options::{PROCESSED_AT_FORMAT, ProcessingOptions};

/// Output of one successful batch.
#[derive(Debug, Clone)]
pub struct ProcessedBatch {
    /// Input columns plus the MSKU, timestamp, and method columns.
    pub data: DataFrame,
    pub records: Vec<AnnotatedRecord>,
    pub summary: ProcessingSummary,
    /// Column the identifiers were read from.
    pub sku_column: String,
    /// How the column was found; `None` for an explicit or fallback column.
    pub column_detection: Option<ColumnDetection>,
    pub processed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: ProcessingOptions,
}

impl BatchProcessor {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Maps every row of `df` to an MSKU, updating `store` on success.
    pub fn process(&self, df: &DataFrame, store: &mut MappingStore) -> Result<ProcessedBatch> {
        self.process_with_observer(df, store, &mut NoopObserver)
    }

    pub fn process_with_observer(
        &self,
        df: &DataFrame,
        store: &mut MappingStore,
        observer: &mut dyn BatchObserver,
    ) -> Result<ProcessedBatch> {
        let mut working = store.clone();
        let batch = self.run(df, &mut working, observer)?;
        *store = working;
        Ok(batch)
    }

    fn run(
        &self,
        df: &DataFrame,
        store: &mut MappingStore,
        observer: &mut dyn BatchObserver,
    ) -> Result<ProcessedBatch> {
        let (sku_column, column_detection) = self.select_column(df, observer)?;
        let identifiers = column_values(df, &sku_column)?;

        let groups = store
            .classifier()
            .group_by_category(identifiers.iter().flatten());
        let unique: usize = groups.iter().map(|(_, members)| members.len()).sum();
        observer.on_event(&BatchEvent::CategoriesGenerated {
            categories: groups.len(),
            identifiers: unique,
        });
        for (category, members) in groups.iter() {
            observer.on_event(&BatchEvent::CategoryGroup {
                category: category.to_string(),
                count: members.len(),
            });
        }
        let added = store.merge_categories(&groups);
        debug!(added, "merged classifier groups");

        let processed_at = self
            .options
            .processed_at
            .unwrap_or_else(|| Local::now().naive_local());
        let records: Vec<AnnotatedRecord> = identifiers
            .into_iter()
            .enumerate()
            .map(|(row, identifier)| {
                let resolution = store.resolve_with_method(identifier.as_deref());
                AnnotatedRecord {
                    row,
                    identifier,
                    msku: resolution.msku,
                    processed_at,
                    method: resolution.method,
                }
            })
            .collect();

        let data = self.annotate(df, &records, processed_at)?;
        let summary = ProcessingSummary::from_mskus(records.iter().map(|r| r.msku.as_str()));
        observer.on_event(&BatchEvent::Completed {
            total: summary.total_records,
            mapped: summary.mapped_records,
            success_rate: summary.success_rate,
        });

        Ok(ProcessedBatch {
            data,
            records,
            summary,
            sku_column,
            column_detection,
            processed_at,
        })
    }

    fn select_column(
        &self,
        df: &DataFrame,
        observer: &mut dyn BatchObserver,
    ) -> Result<(String, Option<ColumnDetection>)> {
        let Some(first) = df.get_columns().first() else {
            return Err(BatchError::EmptySchema);
        };

        if let Some(column) = &self.options.identifier_column {
            if df.column(column).is_err() {
                return Err(BatchError::ColumnNotFound {
                    column: column.clone(),
                });
            }
            observer.on_event(&BatchEvent::ColumnSelected {
                column: column.clone(),
                detection: None,
            });
            return Ok((column.clone(), None));
        }

        match detect_identifier_column_with(df, &self.options.detection) {
            Some(found) => {
                observer.on_event(&BatchEvent::ColumnSelected {
                    column: found.column.clone(),
                    detection: Some(found.clone()),
                });
                Ok((found.column.clone(), Some(found)))
            }
            None if self.options.require_detected_column => Err(BatchError::NoIdentifierColumn),
            None => {
                let column = first.name().to_string();
                observer.on_event(&BatchEvent::ColumnFallback {
                    column: column.clone(),
                });
                Ok((column, None))
            }
        }
    }

    fn annotate(
        &self,
        df: &DataFrame,
        records: &[AnnotatedRecord],
        processed_at: NaiveDateTime,
    ) -> Result<DataFrame> {
        let stamp = processed_at.format(PROCESSED_AT_FORMAT).to_string();
        let mskus: Vec<&str> = records.iter().map(|r| r.msku.as_str()).collect();
        let stamps: Vec<&str> = vec![stamp.as_str(); records.len()];
        let methods: Vec<&str> = records.iter().map(|r| r.method.as_str()).collect();

        let mut data = df.clone();
        data.with_column(Series::new(self.options.msku_column.as_str().into(), mskus).into_column())?;
        data.with_column(
            Series::new(self.options.processed_at_column.as_str().into(), stamps).into_column(),
        )?;
        data.with_column(
            Series::new(self.options.method_column.as_str().into(), methods).into_column(),
        )?;
        Ok(data)
    }
}

/// Processes `df` with default options.
pub fn process_batch(df: &DataFrame, store: &mut MappingStore) -> Result<ProcessedBatch> {
    BatchProcessor::default().process(df, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::EventLog;
    use msku_model::MappingMethod;

    fn frame(name: &str, values: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![Series::new(name.into(), values.to_vec()).into_column()]).unwrap()
    }

    #[test]
    fn test_end_to_end() {
        let df = frame(
            "sku",
            &[Some("WH001"), Some("9999999999999999"), Some(""), None],
        );
        let mut store = MappingStore::new();
        let batch = process_batch(&df, &mut store).unwrap();

        let mskus: Vec<&str> = batch.records.iter().map(|r| r.msku.as_str()).collect();
        assert_eq!(
            mskus,
            vec![
                "ALPHANUMERIC_TYPE_WH",
                "NUMERIC_ORDER_TYPE_999",
                "UNCATEGORIZED_EMPTY",
                "UNCATEGORIZED_UNKNOWN",
            ]
        );
        assert_eq!(batch.summary.success_rate, 50.0);
        assert_eq!(batch.sku_column, "sku");
        assert_eq!(batch.data.width(), 4);
        assert!(store.lookup_explicit("WH001").is_some());
    }

    #[test]
    fn test_explicit_mapping_wins() {
        let df = frame("sku", &[Some("WH001"), Some("1234")]);
        let mut store = MappingStore::new();
        store
            .set_mapping("WIRELESS_HEADPHONES", ["WH001"])
            .unwrap();
        let batch = process_batch(&df, &mut store).unwrap();

        assert_eq!(batch.records[0].msku, "WIRELESS_HEADPHONES");
        assert_eq!(batch.records[0].method, MappingMethod::Explicit);
        assert_eq!(batch.records[1].msku, "HSN_CODE_1234");
        assert_eq!(batch.records[1].method, MappingMethod::IntelligentAuto);
    }

    #[test]
    fn test_fallback_to_first_column() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), &["1", "2"]).into_column(),
            Series::new("b".into(), &["x", "y"]).into_column(),
        ])
        .unwrap();
        let mut store = MappingStore::new();
        let mut log = EventLog::new();
        let batch = BatchProcessor::default()
            .process_with_observer(&df, &mut store, &mut log)
            .unwrap();

        assert_eq!(batch.sku_column, "a");
        assert!(batch.column_detection.is_none());
        assert_eq!(
            log.events()[0],
            BatchEvent::ColumnFallback {
                column: "a".to_string()
            }
        );
    }

    #[test]
    fn test_required_column_leaves_store_untouched() {
        let df = frame("a", &[Some("1"), Some("2")]);
        let mut store = MappingStore::new();
        let processor =
            BatchProcessor::new(ProcessingOptions::default().with_require_detected_column(true));

        let err = processor.process(&df, &mut store).unwrap_err();
        assert!(matches!(err, BatchError::NoIdentifierColumn));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_schema() {
        let df = DataFrame::empty();
        let mut store = MappingStore::new();
        let err = process_batch(&df, &mut store).unwrap_err();
        assert!(matches!(err, BatchError::EmptySchema));
    }
}
