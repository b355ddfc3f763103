//! Shared data model for the MSKU mapping workspace.
//!
//! No I/O happens here. The classifier, the mapping store, and the batch
//! processor exchange these values.

pub mod error;
pub mod mapping;
pub mod record;
pub mod summary;

pub use error::{MappingError, Result};
pub use mapping::{
    MasterMapping, MappingMethod, Resolution, UNCATEGORIZED_EMPTY, UNCATEGORIZED_PREFIX,
    UNCATEGORIZED_UNKNOWN, VariantSet, is_uncategorized,
};
pub use record::AnnotatedRecord;
pub use summary::{
    CategoryDetail, CategoryKind, CategoryStat, MappingReport, ProcessingSummary,
    SAMPLE_VARIANT_LIMIT, percentage,
};
