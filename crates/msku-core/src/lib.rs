//! MSKU batch processing.
//!
//! # Example
//!
//! ```ignore
//! use msku_core::{BatchProcessor, ProcessingOptions, TracingObserver};
//! use msku_map::MappingStore;
//!
//! let mut store = MappingStore::from_mapping(seed);
//! let processor = BatchProcessor::new(ProcessingOptions::default());
//! let batch = processor.process_with_observer(&df, &mut store, &mut TracingObserver)?;
//! println!("{:.1}% mapped", batch.summary.success_rate);
//! ```

pub mod error;
pub mod observer;
pub mod options;
pub mod processor;

pub use error::{BatchError, Result};
pub use observer::{BatchEvent, BatchObserver, EventLog, NoopObserver, TracingObserver};
pub use options::{
    DEFAULT_METHOD_COLUMN, DEFAULT_MSKU_COLUMN, DEFAULT_PROCESSED_AT_COLUMN, PROCESSED_AT_FORMAT,
    ProcessingOptions,
};
pub use processor::{BatchProcessor, ProcessedBatch, process_batch};
