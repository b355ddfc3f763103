#![deny(unsafe_code)]

//! SKU classification and MSKU mapping.
//!
//! - [`classifier`]: ordered heuristic rules turning a raw SKU into a category label.
//! - [`rules`]: the brand, keyword, and prefix vocabulary those rules consult.
//! - [`store`]: explicit mappings plus the classifier-generated subset.
//! - [`repository`]: JSON persistence for master mapping seeds.

pub mod classifier;
pub mod repository;
pub mod rules;
pub mod store;
pub mod utils;

pub use classifier::{Classifier, classify};
pub use repository::{MappingRepository, sample_mappings};
pub use rules::{ClassifierRules, KeywordGroup};
pub use store::MappingStore;
pub use utils::parse_variant_list;
