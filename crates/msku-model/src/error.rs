use thiserror::Error;

/// Errors raised by explicit mapping management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("MSKU must not be empty")]
    EmptyMsku,
    #[error("mapping for '{msku}' needs at least one SKU variant")]
    NoVariants { msku: String },
    #[error("unknown MSKU: {0}")]
    UnknownMsku(String),
    #[error("SKU '{variant}' is not a variant of '{msku}'")]
    VariantNotFound { msku: String, variant: String },
}

pub type Result<T> = std::result::Result<T, MappingError>;
